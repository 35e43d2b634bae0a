use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Idle time after which a mock connection is dropped.
const CLIENT_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// How the mock server answers each request.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// `200 OK` and keep the connection open.
    KeepAlive,
    /// `200 OK` with `Connection: close`, then hang up.
    Close,
    /// The given status, keeping the connection open.
    Status(u16),
}

impl Reply {
    fn response(self) -> String {
        match self {
            Reply::KeepAlive => {
                "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: keep-alive\r\n\r\nhello"
                    .to_owned()
            }
            Reply::Close => {
                "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK".to_owned()
            }
            Reply::Status(code) => {
                format!("HTTP/1.1 {} Mock\r\nContent-Length: 4\r\n\r\nnope", code)
            }
        }
    }

    const fn closes(self) -> bool {
        matches!(self, Reply::Close)
    }
}

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP/1.1 server for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(reply: Reply) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, reply));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_http_server`], but skips when the sandbox forbids sockets.
///
/// # Errors
///
/// Returns an error for any other listener failure.
pub fn spawn_http_server_or_skip(reply: Reply) -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_http_server(reply) {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(stream: TcpStream, reply: Reply) {
    if stream.set_nonblocking(false).is_err()
        || stream.set_read_timeout(Some(CLIENT_READ_TIMEOUT)).is_err()
    {
        return;
    }
    let Ok(mut writer) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(stream);
    let response = reply.response();
    let mut line = String::new();

    loop {
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            if line == "\r\n" {
                break;
            }
        }
        if writer.write_all(response.as_bytes()).is_err() || writer.flush().is_err() {
            return;
        }
        if reply.closes() {
            drop(writer.shutdown(Shutdown::Both));
            return;
        }
    }
}

/// Run the `http-bench` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_bench<I, S>(args: I, cwd: &Path) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = bench_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env("HTTP_BENCH_LOG", "error")
        .output()
        .map_err(|err| format!("run http-bench failed: {}", err))
}

fn bench_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_http-bench").map_or_else(
        || Err("CARGO_BIN_EXE_http-bench missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
