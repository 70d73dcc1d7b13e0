use std::io;
use std::process;

/// Standard Unix exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidUsage = 2,
    SignalPipe = 141, // 128 + SIGPIPE (13)
}

impl ExitCode {
    pub fn exit(self) -> ! {
        process::exit(self as i32)
    }

    /// Pick the exit code for an error that reached `main`.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if is_broken_pipe(err) {
            return ExitCode::SignalPipe;
        }
        let invalid_argument = err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<loglab::Error>(),
                Some(loglab::Error::InvalidArgument(_))
            )
        });
        if invalid_argument {
            ExitCode::InvalidUsage
        } else {
            ExitCode::GeneralError
        }
    }
}

/// Output closed by the reader (e.g. `loglab parse app.log | head`).
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}
