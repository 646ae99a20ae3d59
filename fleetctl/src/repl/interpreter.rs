//! Read-evaluate loop over a device service

use std::io::Write;
use std::time::Duration;

use chrono::Local;
use fleet_api::{ActionStatus, WireEnum};
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::errors::FleetError;
use crate::http::service::DeviceService;
use crate::ops::{actions, devices, display, Outcome};
use crate::repl::command::{Command, CommandError, HELP_LINES};
use crate::tracker::{self, ActionTracker, Failure, TrackerState};

pub const PROMPT: &str = "> ";

/// Suspends between status polls
pub type SleepFn = Box<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

/// Resolves when the user asks to interrupt
pub type InterruptFn = Box<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// What the loop does after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive command interpreter
///
/// Holds no device or action state; every command is a fresh round trip.
pub struct Interpreter<'a, S: ?Sized, W> {
    service: &'a S,
    out: W,
    poll_options: tracker::Options,
    sleep_fn: SleepFn,
    interrupt_fn: InterruptFn,
}

impl<'a, S, W> Interpreter<'a, S, W>
where
    S: DeviceService + ?Sized,
    W: Write + Send,
{
    /// Create an interpreter using real time and Ctrl+C
    pub fn new(service: &'a S, out: W, poll_options: tracker::Options) -> Self {
        Self {
            service,
            out,
            poll_options,
            sleep_fn: Box::new(|duration| tokio::time::sleep(duration).boxed()),
            interrupt_fn: Box::new(|| {
                async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        error!("Unable to listen for Ctrl+C: {}", e);
                        std::future::pending::<()>().await;
                    }
                }
                .boxed()
            }),
        }
    }

    /// Replace the sleep between polls
    pub fn with_sleep(mut self, sleep_fn: SleepFn) -> Self {
        self.sleep_fn = sleep_fn;
        self
    }

    /// Replace the interrupt source
    pub fn with_interrupt(mut self, interrupt_fn: InterruptFn) -> Self {
        self.interrupt_fn = interrupt_fn;
        self
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the welcome banner
    pub fn banner(&mut self) -> Result<(), FleetError> {
        writeln!(self.out, "Device Fleet Management CLI")?;
        writeln!(self.out, "Type 'help' for available commands, 'exit' to quit")?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Run until `exit`, `quit` or end of input
    pub async fn run<R>(&mut self, input: R) -> Result<(), FleetError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            let interrupt = (self.interrupt_fn)();
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = interrupt => {
                    writeln!(self.out, "\nUse 'exit' to quit")?;
                    continue;
                }
            };

            let Some(line) = line else {
                debug!("End of input");
                break;
            };

            if self.execute_line(&line).await? == Flow::Exit {
                break;
            }
        }

        Ok(())
    }

    /// Parse and run one line
    ///
    /// Only failures to write output are returned; everything else is
    /// reported to the user and the session goes on.
    pub async fn execute_line(&mut self, line: &str) -> Result<Flow, FleetError> {
        match Command::parse(line.trim()) {
            Ok(Some(command)) => self.dispatch(command).await,
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                self.report_invalid(&err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn report_invalid(&mut self, err: &CommandError) -> Result<(), FleetError> {
        debug!("Rejected input: {:?}", err);
        match err {
            CommandError::Unknown(_) => {
                writeln!(self.out, "{}", err)?;
                writeln!(self.out, "Type 'help' for available commands")?;
            }
            _ => writeln!(self.out, "Error: {}", err)?,
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow, FleetError> {
        match command {
            Command::List => {
                let result = devices::list(self.service).await;
                self.show(result, None, |devices| display::device_table(&devices))?;
            }
            Command::Register(registration) => {
                let device_id = registration.device_id.clone();
                let result = devices::register(self.service, registration).await;
                self.show(result, Some("Failed to register device"), |()| {
                    display::registered(&device_id)
                })?;
            }
            Command::SetStatus { device_id, status } => {
                let result = devices::set_status(self.service, &device_id, &status).await;
                self.show(result, Some("Failed to update status"), |change| {
                    display::status_changed(&device_id, &change)
                })?;
            }
            Command::GetInfo { device_id } => {
                let result = devices::get_info(self.service, &device_id).await;
                self.show(result, None, |device| display::device_details(&device))?;
            }
            Command::InitiateAction {
                device_id,
                action_type,
                params,
                skipped,
            } => {
                for word in &skipped {
                    warn!("Skipping malformed action parameter '{}'", word);
                    writeln!(
                        self.out,
                        "Warning: Invalid parameter format '{}'. Expected KEY=VALUE",
                        word
                    )?;
                }
                let result = actions::initiate(self.service, &device_id, &action_type, params).await;
                self.show(result, Some("Failed to initiate action"), |action| {
                    display::action_initiated(&action)
                })?;
            }
            Command::ActionStatus { action_id } => {
                let result = actions::status(self.service, &action_id).await;
                self.show(result, None, |action| display::action_details(&action))?;
            }
            Command::PollAction {
                action_id,
                interval,
            } => {
                let options = match interval {
                    Some(interval) => tracker::Options { interval },
                    None => self.poll_options.clone(),
                };
                self.poll(&action_id, &options).await?;
            }
            Command::Help => self.help()?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn show<T>(
        &mut self,
        result: Result<Outcome<T>, FleetError>,
        context: Option<&str>,
        render: impl FnOnce(T) -> String,
    ) -> Result<(), FleetError> {
        let text = match result {
            Ok(Outcome::Done(value)) => render(value),
            Ok(Outcome::Rejected(message)) => display::rejected(context, &message),
            Err(err) => {
                match &err {
                    FleetError::Transport(e) => error!("Remote call failed: {}", e),
                    other => debug!("Operation not attempted: {}", other),
                }
                display::error(&err)
            }
        };
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn help(&mut self) -> Result<(), FleetError> {
        writeln!(self.out, "\nAvailable commands:")?;
        for line in HELP_LINES {
            writeln!(self.out, "  {}", line)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    async fn poll(&mut self, action_id: &str, options: &tracker::Options) -> Result<(), FleetError> {
        writeln!(
            self.out,
            "Polling action '{}' (interval: {}s)...",
            action_id,
            display::format_seconds(options.interval)
        )?;
        writeln!(self.out, "Press Ctrl+C to stop polling\n")?;

        let cancel = CancellationToken::new();
        let watcher = tokio::spawn({
            let cancel = cancel.clone();
            let interrupt = (self.interrupt_fn)();
            async move {
                interrupt.await;
                cancel.cancel();
            }
        });

        let out = &mut self.out;
        let sleep_fn = &self.sleep_fn;
        let tracker = tracker::poll_action(
            self.service,
            action_id,
            options,
            |duration| sleep_fn(duration),
            &cancel,
            |action| {
                let line = format!(
                    "[{}] Status: {}",
                    Local::now().format("%H:%M:%S"),
                    ActionStatus::format_wire(action.status)
                );
                if let Err(e) = writeln!(out, "{}", line) {
                    warn!("Unable to print poll progress: {}", e);
                }
            },
        )
        .await;
        watcher.abort();

        self.report_poll(&tracker)
    }

    fn report_poll(&mut self, tracker: &ActionTracker) -> Result<(), FleetError> {
        match tracker.state() {
            TrackerState::DoneOk => {
                writeln!(self.out, "\n{} Action completed successfully!", display::ok_mark())?;
            }
            TrackerState::DoneFail => match tracker.failure() {
                Some(Failure::Action { error_message }) => {
                    writeln!(self.out, "\n{} Action failed!", display::fail_mark())?;
                    if let Some(message) = error_message {
                        writeln!(self.out, "  Error: {}", message)?;
                    }
                }
                Some(Failure::Rejected(message)) => {
                    writeln!(self.out, "{}", display::rejected(None, message))?;
                }
                Some(Failure::Transport(err)) => {
                    writeln!(self.out, "{}", display::transport_failure(err))?;
                }
                None => writeln!(self.out, "{} Polling failed", display::fail_mark())?,
            },
            TrackerState::DoneCancelled => {
                writeln!(self.out, "\n\nPolling stopped by user.")?;
            }
            TrackerState::Observing => {}
        }
        Ok(())
    }
}
