//! Minimal illustrative use of `calltrace`: trace the command given on the command line and print
//! each entry/exit event. Just enough argument handling to make the demo runnable.

use std::process::Command;

use calltrace::tracer::{CommandChild, Tracer};
use calltrace::Trace;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let program = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: trace-cmd <program> [args...]");
            std::process::exit(2);
        }
    };

    let mut command = Command::new(program);
    command.args(args);

    let mut tracer = Tracer::new(CommandChild::new(command));
    tracer.register_global_cb(std::rc::Rc::new(print_event));

    if let Err(e) = tracer.run() {
        eprintln!("trace-cmd: {}", e);
        std::process::exit(1);
    }
}

fn print_event(trace: &Trace) {
    let phase = if trace.exit { "exit" } else { "enter" };
    let args: Vec<String> = trace.args.iter().map(|a| a.printable.clone()).collect();
    if trace.exit {
        let desc = trace
            .ret
            .description
            .as_deref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        println!(
            "[{}] {}({}) = {}{}",
            phase,
            trace.signature.name,
            args.join(", "),
            trace.ret.code,
            desc
        );
    } else {
        println!("[{}] {}(...)", phase, trace.signature.name);
    }
}
