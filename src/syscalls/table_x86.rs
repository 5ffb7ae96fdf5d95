//! x86-32 Linux signature table. Covers the small common subset plus the synthesized
//! `socketcall`/`ipc` subcommand ids (400+/420+ bias) the x86-32 binding resolves to.

use crate::signature::{ArgKind::*, ArgSpec};

use super::{entry, Entry};

fn a(name: &'static str, kind: crate::signature::ArgKind) -> ArgSpec {
    ArgSpec::new(name, kind, false)
}

fn c(name: &'static str, kind: crate::signature::ArgKind) -> ArgSpec {
    ArgSpec::new(name, kind, true)
}

pub(super) fn entries() -> Vec<Entry> {
    vec![
        entry(1, "exit", vec![a("status", I32)]),
        entry(2, "fork", vec![]),
        entry(3, "read", vec![a("fd", U32), a("buf", StringC), a("count", UWord)]),
        entry(4, "write", vec![a("fd", U32), c("buf", StringC), a("count", UWord)]),
        entry(5, "open", vec![c("filename", StringC), a("flags", I32), a("mode", I32)]),
        entry(6, "close", vec![a("fd", U32)]),
        entry(
            7,
            "waitpid",
            vec![a("pid", I32), a("stat_addr", I32), a("options", I32)],
        ),
        entry(8, "creat", vec![c("pathname", StringC), a("mode", I32)]),
        entry(9, "link", vec![c("oldname", StringC), c("newname", StringC)]),
        entry(10, "unlink", vec![c("pathname", StringC)]),
        entry(11, "execve", vec![c("filename", StringC), c("argv", UnknownStruct), c("envp", UnknownStruct)]),
        entry(12, "chdir", vec![c("filename", StringC)]),
        entry(13, "time", vec![a("tloc", UnknownStruct)]),
        entry(19, "lseek", vec![a("fd", U32), a("offset", I32), a("whence", U32)]),
        entry(20, "getpid", vec![]),
        entry(33, "access", vec![c("filename", StringC), a("mode", I32)]),
        entry(39, "mkdir", vec![c("pathname", StringC), a("mode", I32)]),
        entry(40, "rmdir", vec![c("pathname", StringC)]),
        entry(45, "brk", vec![a("brk", UWord)]),
        entry(54, "ioctl", vec![a("fd", U32), a("cmd", U32), a("arg", UWord)]),
        entry(
            90,
            "mmap",
            vec![a("addr", UWord), a("len", UWord), a("prot", UWord), a("flags", UWord), a("fd", UWord), a("offset", UWord)],
        ),
        entry(91, "munmap", vec![a("addr", UWord), a("len", UWord)]),
        entry(
            102,
            "socketcall",
            vec![a("call", I32), a("args", UnknownStruct)],
        ),
        entry(
            114,
            "wait4",
            vec![a("upid", I32), a("stat_addr", I32), a("options", I32), a("ru", UnknownStruct)],
        ),
        entry(
            117,
            "ipc",
            vec![
                a("call", U32),
                a("first", I32),
                a("second", I32),
                a("third", I32),
                a("ptr", UnknownStruct),
                a("fifth", I32),
            ],
        ),
        entry(162, "nanosleep", vec![a("rqtp", UnknownStruct), a("rmtp", UnknownStruct)]),
        entry(243, "set_thread_area", vec![a("u_info", UnknownStruct)]),
        entry(252, "exit_group", vec![a("error_code", I32)]),
        // Synthesized socketcall subcommand ids: 400 + subcommand number.
        entry(401, "socket", vec![a("family", I32), a("type", I32), a("protocol", I32)]),
        entry(402, "bind", vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", I32)]),
        entry(403, "connect", vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", I32)]),
        entry(404, "listen", vec![a("fd", I32), a("backlog", I32)]),
        entry(405, "accept", vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", UnknownStruct)]),
        entry(406, "getsockname", vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", UnknownStruct)]),
        entry(407, "getpeername", vec![a("fd", I32), a("addr", UnknownStruct), a("addrlen", UnknownStruct)]),
        entry(408, "socketpair", vec![a("family", I32), a("type", I32), a("protocol", I32), a("usockvec", UnknownStruct)]),
        entry(409, "send", vec![a("fd", I32), c("buf", StringC), a("len", UWord), a("flags", I32)]),
        entry(410, "recv", vec![a("fd", I32), a("buf", StringBuffer), a("len", UWord), a("flags", I32)]),
        entry(411, "sendto", vec![a("fd", I32), c("buf", StringC), a("len", UWord), a("flags", I32), a("addr", UnknownStruct), a("addrlen", I32)]),
        entry(412, "recvfrom", vec![a("fd", I32), a("buf", StringBuffer), a("len", UWord), a("flags", I32), a("addr", UnknownStruct), a("addrlen", UnknownStruct)]),
        entry(413, "shutdown", vec![a("fd", I32), a("how", I32)]),
        entry(414, "setsockopt", vec![a("fd", I32), a("level", I32), a("optname", I32), a("optval", Buffer), a("optlen", I32)]),
        entry(415, "getsockopt", vec![a("fd", I32), a("level", I32), a("optname", I32), a("optval", Buffer), a("optlen", UnknownStruct)]),
        entry(416, "sendmsg", vec![a("fd", I32), a("msg", UnknownStruct), a("flags", I32)]),
        entry(417, "recvmsg", vec![a("fd", I32), a("msg", UnknownStruct), a("flags", I32)]),
        // Synthesized ipc subcommand ids: 420 + subcommand number.
        entry(421, "semop", vec![a("semid", I32), a("tsops", UnknownStruct), a("nsops", U32)]),
        entry(422, "semget", vec![a("key", I32), a("nsems", I32), a("semflg", I32)]),
        entry(423, "semctl", vec![a("semid", I32), a("semnum", I32), a("cmd", I32), a("arg", UnknownStruct)]),
        entry(431, "msgsnd", vec![a("msqid", I32), a("msgp", UnknownStruct), a("msgsz", UWord), a("msgflg", I32)]),
        entry(432, "msgrcv", vec![a("msqid", I32), a("msgp", UnknownStruct), a("msgsz", UWord), a("msgtyp", I32)]),
        entry(433, "msgget", vec![a("key", I32), a("msgflg", I32)]),
        entry(434, "msgctl", vec![a("msqid", I32), a("cmd", I32), a("buf", UnknownStruct)]),
        entry(441, "shmat", vec![a("shmid", I32), a("shmaddr", UnknownStruct), a("shmflg", I32)]),
        entry(442, "shmdt", vec![a("shmaddr", UnknownStruct)]),
        entry(443, "shmget", vec![a("key", I32), a("size", UWord), a("shmflg", I32)]),
        entry(444, "shmctl", vec![a("shmid", I32), a("cmd", I32), a("buf", UnknownStruct)]),
    ]
}
