//! x86-64 Linux signature table. Covers the common POSIX surface plus `arch_prctl` (id 158), the
//! one call this crate decodes with a custom decoder.

use crate::signature::{ArgKind::*, ArgSpec};

use super::{entry, Entry};

fn a(name: &'static str, kind: crate::signature::ArgKind) -> ArgSpec {
    ArgSpec::new(name, kind, false)
}

fn c(name: &'static str, kind: crate::signature::ArgKind) -> ArgSpec {
    ArgSpec::new(name, kind, true)
}

fn ptr(kind: crate::signature::ArgKind) -> crate::signature::ArgKind {
    Ptr(Box::new(kind))
}

pub(super) fn entries() -> Vec<Entry> {
    vec![
        entry(0, "read", vec![a("fd", I32), a("buf", StringC), a("count", UWord)]),
        entry(1, "write", vec![a("fd", I32), c("buf", StringC), a("count", UWord)]),
        entry(2, "open", vec![c("filename", StringC), a("flags", I32), a("mode", U32)]),
        entry(3, "close", vec![a("fd", I32)]),
        entry(4, "stat", vec![c("filename", StringC), a("statbuf", UnknownStruct)]),
        entry(5, "fstat", vec![a("fd", I32), a("statbuf", UnknownStruct)]),
        entry(6, "lstat", vec![c("filename", StringC), a("statbuf", UnknownStruct)]),
        entry(
            7,
            "poll",
            vec![a("ufds", UnknownStruct), a("nfds", U32), a("timeout_msecs", I32)],
        ),
        entry(8, "lseek", vec![a("fd", U32), a("offset", Word), a("whence", U32)]),
        entry(
            9,
            "mmap",
            vec![
                a("addr", UWord),
                a("len", UWord),
                a("prot", UWord),
                a("flags", UWord),
                a("fd", UWord),
                a("off", UWord),
            ],
        ),
        entry(10, "mprotect", vec![a("start", UWord), a("len", UWord), a("prot", UWord)]),
        entry(11, "munmap", vec![a("addr", UWord), a("len", UWord)]),
        entry(12, "brk", vec![a("brk", UWord)]),
        entry(
            13,
            "rt_sigaction",
            vec![
                a("sig", I32),
                c("act", UnknownStruct),
                a("oact", UnknownStruct),
                a("sigsetsize", UWord),
            ],
        ),
        entry(
            14,
            "rt_sigprocmask",
            vec![
                a("how", I32),
                a("nset", UnknownStruct),
                a("oset", UnknownStruct),
                a("sigsetsize", UWord),
            ],
        ),
        entry(16, "ioctl", vec![a("fd", U32), a("cmd", U32), a("arg", UWord)]),
        entry(
            17,
            "pread64",
            vec![a("fd", U32), a("buf", StringC), a("count", UWord), a("pos", Word)],
        ),
        entry(
            18,
            "pwrite64",
            vec![a("fd", U32), c("buf", StringC), a("count", UWord), a("pos", Word)],
        ),
        entry(19, "readv", vec![a("fd", UWord), a("vec", UnknownStruct), a("vlen", UWord)]),
        entry(20, "writev", vec![a("fd", UWord), c("vec", UnknownStruct), a("vlen", UWord)]),
        entry(21, "access", vec![c("filename", StringC), a("mode", I32)]),
        entry(22, "pipe", vec![a("fildes", ptr(I32))]),
        entry(
            23,
            "select",
            vec![
                a("n", I32),
                a("inp", UnknownStruct),
                a("outp", UnknownStruct),
                a("exp", UnknownStruct),
                a("tvp", UnknownStruct),
            ],
        ),
        entry(24, "sched_yield", vec![]),
        entry(32, "dup", vec![a("fildes", U32)]),
        entry(33, "dup2", vec![a("oldfd", U32), a("newfd", U32)]),
        entry(34, "pause", vec![]),
        entry(
            35,
            "nanosleep",
            vec![a("rqtp", UnknownStruct), a("rmtp", UnknownStruct)],
        ),
        entry(39, "getpid", vec![]),
        entry(41, "socket", vec![a("family", I32), a("type", I32), a("protocol", I32)]),
        entry(
            42,
            "connect",
            vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", I32)],
        ),
        entry(
            43,
            "accept",
            vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", ptr(I32))],
        ),
        entry(
            44,
            "sendto",
            vec![
                a("fd", I32),
                c("buf", StringC),
                a("len", UWord),
                a("flags", U32),
                a("addr", UnknownStruct),
                a("addrlen", I32),
            ],
        ),
        entry(
            45,
            "recvfrom",
            vec![
                a("fd", I32),
                a("buf", StringBuffer),
                a("len", UWord),
                a("flags", U32),
                a("addr", UnknownStruct),
                a("addrlen", ptr(I32)),
            ],
        ),
        entry(
            49,
            "bind",
            vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", I32)],
        ),
        entry(50, "listen", vec![a("fd", I32), a("backlog", I32)]),
        entry(
            56,
            "clone",
            vec![
                a("clone_flags", UWord),
                a("newsp", UWord),
                a("parent_tidptr", ptr(I32)),
                a("child_tidptr", ptr(I32)),
                a("tls", UWord),
            ],
        ),
        entry(57, "fork", vec![]),
        entry(58, "vfork", vec![]),
        entry(
            59,
            "execve",
            vec![
                c("filename", StringC),
                c("argv", UnknownStruct),
                c("envp", UnknownStruct),
            ],
        ),
        entry(60, "exit", vec![a("error_code", I32)]),
        entry(
            61,
            "wait4",
            vec![
                a("upid", I32),
                a("stat_addr", ptr(I32)),
                a("options", I32),
                a("ru", UnknownStruct),
            ],
        ),
        entry(62, "kill", vec![a("pid", I32), a("sig", I32)]),
        entry(63, "uname", vec![a("name", UnknownStruct)]),
        entry(72, "fcntl", vec![a("fd", U32), a("cmd", U32), a("arg", UWord)]),
        entry(
            78,
            "getdents",
            vec![a("fd", U32), a("dirent", UnknownStruct), a("count", U32)],
        ),
        entry(79, "getcwd", vec![a("buf", StringBuffer), a("size", UWord)]),
        entry(82, "rename", vec![c("oldname", StringC), c("newname", StringC)]),
        entry(83, "mkdir", vec![c("pathname", StringC), a("mode", U32)]),
        entry(84, "rmdir", vec![c("pathname", StringC)]),
        entry(85, "creat", vec![c("pathname", StringC), a("mode", U32)]),
        entry(86, "link", vec![c("oldname", StringC), c("newname", StringC)]),
        entry(87, "unlink", vec![c("pathname", StringC)]),
        entry(
            89,
            "readlink",
            vec![c("path", StringC), a("buf", StringBuffer), a("bufsiz", I32)],
        ),
        entry(95, "umask", vec![a("mask", I32)]),
        entry(
            96,
            "gettimeofday",
            vec![a("tv", UnknownStruct), a("tz", UnknownStruct)],
        ),
        entry(97, "getrlimit", vec![a("resource", U32), a("rlim", UnknownStruct)]),
        entry(102, "getuid", vec![]),
        entry(104, "getgid", vec![]),
        entry(105, "setuid", vec![a("uid", U32)]),
        entry(107, "geteuid", vec![]),
        entry(108, "getegid", vec![]),
        entry(110, "getppid", vec![]),
        entry(158, "arch_prctl", vec![a("code", I32), a("addr", UWord)]),
        entry(186, "gettid", vec![]),
        entry(218, "set_tid_address", vec![a("tidptr", ptr(I32))]),
        entry(
            228,
            "clock_gettime",
            vec![a("which_clock", I32), a("tp", UnknownStruct)],
        ),
        entry(231, "exit_group", vec![a("error_code", I32)]),
        entry(
            257,
            "openat",
            vec![
                a("dfd", I32),
                c("filename", StringC),
                a("flags", I32),
                a("mode", U32),
            ],
        ),
        entry(
            262,
            "newfstatat",
            vec![
                a("dfd", I32),
                c("filename", StringC),
                a("statbuf", UnknownStruct),
                a("flag", I32),
            ],
        ),
        entry(
            302,
            "prlimit64",
            vec![
                a("pid", I32),
                a("resource", U32),
                a("new_rlim", UnknownStruct),
                a("old_rlim", UnknownStruct),
            ],
        ),
        entry(
            318,
            "getrandom",
            vec![a("buf", StringBuffer), a("count", UWord), a("flags", U32)],
        ),
        entry(332, "statx", vec![
            a("dfd", I32),
            c("filename", StringC),
            a("flags", I32),
            a("mask", U32),
            a("buffer", UnknownStruct),
        ]),
    ]
}
