//! Main application run loop

use std::io::Write;

use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::errors::FleetError;
use crate::http::connection::{Connection, Endpoint};
use crate::http::service::DeviceService;
use crate::repl::Interpreter;

/// Connect to the service and run an interactive session on stdin/stdout
pub async fn run(options: AppOptions) -> Result<(), FleetError> {
    let endpoint = Endpoint::parse(&options.server)?;
    let connection =
        Connection::open(endpoint, options.connect_timeout, options.request_timeout).await?;

    let input = BufReader::new(tokio::io::stdin());
    let result = session(connection.client(), &options, input, std::io::stdout()).await;
    if let Err(e) = &result {
        error!("Session ended with an error: {}", e);
    }

    connection.close();
    println!("\nGoodbye!");
    result
}

/// Banner plus the read-evaluate loop, over any service and streams
pub async fn session<S, R, W>(
    service: &S,
    options: &AppOptions,
    input: R,
    out: W,
) -> Result<(), FleetError>
where
    S: DeviceService + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    info!("Starting interactive session");
    let mut interpreter = Interpreter::new(service, out, options.tracker.clone());
    interpreter.banner()?;
    interpreter.run(input).await
}
