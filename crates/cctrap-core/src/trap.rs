use crate::exec::Executor;
use crate::record::ResultRecord;
use crate::rewrite::{SourceProbe, rewrite};
use crate::sink::ResultSink;
use std::ffi::OsStr;
use tracing::{error, warn};

/// Exit status used when the command interpreter itself cannot be started.
pub const SPAWN_FAILURE_STATUS: i32 = 127;

/// One compiler interception: rewrite, log, then delegate.
///
/// Logging is best effort. Whatever happens to the record, the proxy command
/// still runs and its exit code is the result.
pub struct Trap<S, E, P> {
    host_compiler: String,
    sink: S,
    executor: E,
    probe: P,
}

impl<S, E, P> Trap<S, E, P>
where
    S: ResultSink,
    E: Executor,
    P: SourceProbe,
{
    pub fn new(host_compiler: impl Into<String>, sink: S, executor: E, probe: P) -> Self {
        Self {
            host_compiler: host_compiler.into(),
            sink,
            executor,
            probe,
        }
    }

    pub fn run<I, T>(&mut self, tokens: I) -> i32
    where
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        let rewritten = rewrite(tokens, &self.host_compiler, &self.probe);

        let record = ResultRecord::new(rewritten.source_file, rewritten.command.as_os_str());
        if let Err(e) = self.sink.append(&record) {
            warn!("could not log invocation: {}", e);
        }

        match self.executor.run(&rewritten.command) {
            Ok(code) => code,
            Err(e) => {
                error!("{}", e);
                SPAWN_FAILURE_STATUS
            }
        }
    }

    pub fn into_parts(self) -> (S, E) {
        (self.sink, self.executor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::ProxyCommand;
    use crate::sink::MemorySink;
    use crate::{Error, Result};

    #[derive(Default)]
    struct FakeExecutor {
        status: i32,
        seen: Vec<String>,
    }

    impl Executor for FakeExecutor {
        fn run(&mut self, command: &ProxyCommand) -> Result<i32> {
            self.seen.push(command.to_string());
            Ok(self.status)
        }
    }

    struct BrokenSink;

    impl ResultSink for BrokenSink {
        fn append(&mut self, _record: &ResultRecord) -> Result<()> {
            Err(Error::Io(std::io::Error::other("disk full")))
        }
    }

    struct UnspawnableExecutor;

    impl Executor for UnspawnableExecutor {
        fn run(&mut self, _command: &ProxyCommand) -> Result<i32> {
            Err(Error::Spawn {
                program: "sh".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    fn main_c_exists(path: &OsStr) -> bool {
        path == "main.c"
    }

    #[test]
    fn test_logs_then_delegates() {
        let executor = FakeExecutor {
            status: 0,
            ..Default::default()
        };
        let mut trap = Trap::new("gcc", MemorySink::new(), executor, main_c_exists);

        let code = trap.run(["-c", "-D__LIBUKLIBID_COMPILER__=Clang 14.0", "main.c", "-o", "main.o"]);
        assert_eq!(code, 0);

        let (sink, executor) = trap.into_parts();
        let expected = "gcc -c -D__LIBUKLIBID_COMPILER__=\"Clang 14.0 \" main.c -o main.o ";
        assert_eq!(executor.seen, vec![expected.to_string()]);
        assert_eq!(sink.contents(), format!("main.c\n{expected}\n\n").into_bytes());
    }

    #[test]
    fn test_failure_status_is_propagated() {
        let executor = FakeExecutor {
            status: 4,
            ..Default::default()
        };
        let mut trap = Trap::new("gcc", MemorySink::new(), executor, main_c_exists);
        assert_eq!(trap.run(["-E", "header.h"]), 4);

        let (sink, _) = trap.into_parts();
        assert_eq!(sink.contents(), b"None\ngcc -E header.h \n\n");
    }

    #[test]
    fn test_logging_failure_does_not_block_compile() {
        let executor = FakeExecutor {
            status: 0,
            ..Default::default()
        };
        let mut trap = Trap::new("gcc", BrokenSink, executor, main_c_exists);
        assert_eq!(trap.run(["main.c"]), 0);

        let (_, executor) = trap.into_parts();
        assert_eq!(executor.seen, vec!["gcc main.c ".to_string()]);
    }

    #[test]
    fn test_unspawnable_shell_exits_127() {
        let mut trap = Trap::new("gcc", MemorySink::new(), UnspawnableExecutor, main_c_exists);
        assert_eq!(trap.run(["main.c"]), SPAWN_FAILURE_STATUS);

        // the record is written before delegation is attempted
        let (sink, _) = trap.into_parts();
        assert_eq!(sink.records().len(), 1);
    }
}
