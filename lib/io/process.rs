use super::{Io, Pipe};
use anyhow::{bail, Context, Error as Anyhow};
use async_trait::async_trait;
use derive_more::{Display, Error};
use std::{io, time::Duration};
use tokio::{runtime, task::block_in_place, time::timeout};
use tracing::{error, field::display, instrument, Span};

#[cfg(test)]
#[async_trait]
#[mockall::automock]
trait Child {
    async fn wait(&mut self) -> io::Result<String>;
    async fn kill(&mut self) -> io::Result<()>;
}

/// The reason why spawning the engine process failed.
#[derive(Debug, Display, Error)]
pub enum SpawnError {
    /// The path does not resolve to an executable.
    #[display(fmt = "no engine found at the configured path")]
    EngineNotFound(io::Error),

    /// The engine could not be launched.
    #[display(fmt = "the engine failed to launch")]
    EngineLaunchFailed(io::Error),
}

impl From<io::Error> for SpawnError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => SpawnError::EngineNotFound(e),
            _ => SpawnError::EngineLaunchFailed(e),
        }
    }
}

/// An [`Io`] interface for the engine process.
#[derive(Debug)]
pub struct Process {
    #[cfg(test)]
    pipe: Pipe<tokio::io::DuplexStream, tokio::io::DuplexStream>,

    #[cfg(not(test))]
    pipe: Pipe<tokio::process::ChildStdin, tokio::process::ChildStdout>,

    #[cfg(test)]
    child: MockChild,

    #[cfg(not(test))]
    child: tokio::process::Child,
}

impl Process {
    #[cfg(test)]
    const TIMEOUT: Duration = Duration::ZERO;

    #[cfg(not(test))]
    const TIMEOUT: Duration = Duration::from_millis(1000);

    /// Spawns the engine process with its stdio redirected as pipes.
    #[instrument(level = "trace", err)]
    pub fn spawn(path: &str) -> Result<Self, SpawnError> {
        #[cfg(test)]
        {
            Ok(Process {
                pipe: tokio::io::duplex(1).into(),
                child: MockChild::new(),
            })
        }

        #[cfg(not(test))]
        {
            use std::process::Stdio;

            let mut child = tokio::process::Command::new(path)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()?;

            let pipe = Option::zip(child.stdin.take(), child.stdout.take()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::Other,
                    Anyhow::msg("failed to open the engine's stdio"),
                )
            })?;

            Ok(Process {
                pipe: pipe.into(),
                child,
            })
        }
    }
}

/// Flushes the outbound buffer and waits for the engine process to exit.
impl Drop for Process {
    #[instrument(level = "trace", skip(self), fields(status))]
    fn drop(&mut self) {
        let result: Result<_, Anyhow> = block_in_place(|| {
            runtime::Handle::try_current()?.block_on(async {
                self.flush().await?;
                match timeout(Self::TIMEOUT, self.child.wait()).await {
                    Ok(status) => Ok(status?),
                    Err(_) => {
                        self.child.kill().await?;
                        bail!(
                            "timed out after {}s waiting for the engine to exit",
                            Self::TIMEOUT.as_secs()
                        );
                    }
                }
            })
        });

        match result.context("failed to gracefully terminate the engine process") {
            Err(e) => error!("{:?}", e),
            Ok(s) => {
                Span::current().record("status", display(s));
            }
        }
    }
}

#[async_trait]
impl Io for Process {
    async fn recv(&mut self) -> io::Result<String> {
        self.pipe.recv().await
    }

    async fn send(&mut self, msg: &str) -> io::Result<()> {
        self.pipe.send(msg).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.pipe.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;
    use test_strategy::proptest;
    use tokio::time::sleep;

    #[proptest]
    fn spawn_error_distinguishes_a_missing_engine(e: io::Error) {
        match e.kind() {
            io::ErrorKind::NotFound => {
                assert!(matches!(SpawnError::from(e), SpawnError::EngineNotFound(_)))
            }

            _ => assert!(matches!(
                SpawnError::from(e),
                SpawnError::EngineLaunchFailed(_)
            )),
        }
    }

    #[proptest]
    fn drop_waits_for_the_engine_process_to_exit(status: String) {
        let rt = runtime::Builder::new_multi_thread().enable_time().build()?;

        let mut process = Process::spawn("")?;

        process
            .child
            .expect_wait()
            .once()
            .return_once(move || Box::pin(ready(Ok(status))));

        process.child.expect_kill().never();

        rt.block_on(async move {
            drop(process);
        })
    }

    #[proptest]
    fn drop_kills_the_engine_process_if_it_does_not_exit_gracefully(status: String) {
        let rt = runtime::Builder::new_multi_thread().enable_time().build()?;

        let mut process = Process::spawn("")?;

        process.child.expect_wait().return_once(move || {
            Box::pin(async move {
                sleep(Duration::from_secs(1)).await;
                Ok(status)
            })
        });

        process
            .child
            .expect_kill()
            .once()
            .return_once(move || Box::pin(ready(Ok(()))));

        rt.block_on(async move {
            drop(process);
        })
    }

    #[proptest]
    fn drop_recovers_if_waiting_on_the_engine_process_fails(e: io::Error) {
        let rt = runtime::Builder::new_multi_thread().enable_time().build()?;

        let mut process = Process::spawn("")?;

        process
            .child
            .expect_wait()
            .once()
            .return_once(move || Box::pin(ready(Err(e))));

        process.child.expect_kill().never();

        rt.block_on(async move {
            drop(process);
        })
    }

    #[proptest]
    fn drop_recovers_if_killing_the_engine_process_fails(status: String, e: io::Error) {
        let rt = runtime::Builder::new_multi_thread().enable_time().build()?;

        let mut process = Process::spawn("")?;

        process.child.expect_wait().return_once(move || {
            Box::pin(async move {
                sleep(Duration::from_secs(1)).await;
                Ok(status)
            })
        });

        process
            .child
            .expect_kill()
            .once()
            .return_once(move || Box::pin(ready(Err(e))));

        rt.block_on(async move {
            drop(process);
        })
    }

    #[proptest]
    fn drop_recovers_from_missing_runtime() {
        drop(Process::spawn("")?);
    }
}
