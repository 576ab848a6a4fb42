use crate::simulation::StopHandle;
use anyhow::Result;

#[cfg(feature = "signals")]
mod listener {
    use std::io;

    /// Handlers registered up front, so a signal arriving before the
    /// listener thread is scheduled still sets the stop flag.
    #[cfg(unix)]
    pub struct ShutdownSignals {
        interrupt: tokio::signal::unix::Signal,
        terminate: tokio::signal::unix::Signal,
    }

    #[cfg(unix)]
    impl ShutdownSignals {
        pub fn register() -> io::Result<Self> {
            use tokio::signal::unix::{signal, SignalKind};

            Ok(Self {
                interrupt: signal(SignalKind::interrupt())?,
                terminate: signal(SignalKind::terminate())?,
            })
        }

        pub async fn recv(mut self) -> io::Result<&'static str> {
            tokio::select! {
                _ = self.interrupt.recv() => Ok("SIGINT"),
                _ = self.terminate.recv() => Ok("SIGTERM"),
            }
        }
    }

    #[cfg(not(unix))]
    pub struct ShutdownSignals;

    #[cfg(not(unix))]
    impl ShutdownSignals {
        pub fn register() -> io::Result<Self> {
            Ok(Self)
        }

        pub async fn recv(self) -> io::Result<&'static str> {
            tokio::signal::ctrl_c().await.map(|()| "Ctrl+C")
        }
    }
}

/// Set `stop` when the process receives Ctrl+C or, on unix, SIGTERM.
///
/// The handlers are live once this returns. A helper thread runs a
/// current-thread `tokio` runtime that waits for the first signal.
#[cfg(feature = "signals")]
pub fn install_stop_signal(stop: StopHandle) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let signals = {
        let _guard = runtime.enter();
        listener::ShutdownSignals::register()?
    };

    std::thread::Builder::new()
        .name("signal-listener".into())
        .spawn(move || {
            runtime.block_on(async {
                match signals.recv().await {
                    Ok(name) => {
                        log::debug!("Received {}, stopping after the current tick", name);
                        stop.stop();
                    }
                    Err(e) => log::error!("Failed to listen for shutdown signals: {}", e),
                }
            });
        })?;

    Ok(())
}

#[cfg(not(feature = "signals"))]
pub fn install_stop_signal(_stop: StopHandle) -> Result<()> {
    log::warn!("Built without the 'signals' feature; use --ticks to bound the run");
    Ok(())
}
