//! In-process directory stub speaking just enough LDAP for bind/unbind.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const SUFFIX: &str = "corp.example.com";

/// How the stub reacts to a bind request
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Answer binds from the account table.
    Directory,
    /// Read requests, never answer.
    Silent,
    /// Answer every bind with a complete BER element that is not an
    /// LDAP message, then hang up.
    Garbage,
}

#[derive(Default)]
pub struct Stats {
    pub connections: AtomicUsize,
    pub binds: AtomicUsize,
    pub unbinds: AtomicUsize,
}

pub struct StubDirectory {
    pub addr: SocketAddr,
    pub stats: Arc<Stats>,
}

impl StubDirectory {
    pub async fn start(behavior: Behavior) -> Self {
        Self::start_on("127.0.0.1:0", behavior).await
    }

    pub async fn start_on(bind_addr: &str, behavior: Behavior) -> Self {
        let listener = TcpListener::bind(bind_addr).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(Stats::default());

        let mut accounts = HashMap::new();
        accounts.insert(format!("alice@{}", SUFFIX), "correctpassword".to_string());
        let accounts = Arc::new(accounts);

        let server_stats = Arc::clone(&stats);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                server_stats.connections.fetch_add(1, Ordering::SeqCst);
                let stats = Arc::clone(&server_stats);
                let accounts = Arc::clone(&accounts);
                tokio::spawn(async move {
                    let _ = serve(stream, behavior, accounts, stats).await;
                });
            }
        });

        Self { addr, stats }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn binds(&self) -> usize {
        self.stats.binds.load(Ordering::SeqCst)
    }

    pub fn connections(&self) -> usize {
        self.stats.connections.load(Ordering::SeqCst)
    }

    /// Wait until `count` unbinds were received, or give up after two seconds.
    pub async fn wait_for_unbinds(&self, count: usize) -> usize {
        for _ in 0..200 {
            let seen = self.stats.unbinds.load(Ordering::SeqCst);
            if seen >= count {
                return seen;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.stats.unbinds.load(Ordering::SeqCst)
    }
}

async fn serve(
    mut stream: TcpStream,
    behavior: Behavior,
    accounts: Arc<HashMap<String, String>>,
    stats: Arc<Stats>,
) -> io::Result<()> {
    loop {
        let tag = stream.read_u8().await?;
        let len = read_length(&mut stream).await?;
        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).await?;
        if tag != 0x30 {
            return Ok(());
        }

        let Some((0x02, message_id, op)) = split_tlv(&body) else {
            return Ok(());
        };
        let Some((op_tag, op_value, _)) = split_tlv(op) else {
            return Ok(());
        };

        match op_tag {
            // BindRequest
            0x60 => {
                stats.binds.fetch_add(1, Ordering::SeqCst);
                match behavior {
                    Behavior::Directory => {
                        let code = bind_result(op_value, &accounts);
                        stream.write_all(&bind_response(message_id, code)).await?;
                    }
                    Behavior::Silent => {}
                    Behavior::Garbage => {
                        // OCTET STRING "A" where an LDAPMessage SEQUENCE is expected
                        stream.write_all(&[0x04, 0x01, 0x41]).await?;
                        stream.flush().await?;
                        return Ok(());
                    }
                }
            }
            // UnbindRequest
            0x42 => {
                stats.unbinds.fetch_add(1, Ordering::SeqCst);
                return Ok(());
            }
            _ => return Ok(()),
        }
    }
}

/// 0 on success, 49 (invalidCredentials) otherwise. An empty password is an
/// unauthenticated bind, which real servers accept.
fn bind_result(request: &[u8], accounts: &HashMap<String, String>) -> u8 {
    let Some((0x02, _version, rest)) = split_tlv(request) else {
        return 2;
    };
    let Some((0x04, name, rest)) = split_tlv(rest) else {
        return 2;
    };
    let Some((0x80, password, _)) = split_tlv(rest) else {
        return 2;
    };

    let name = String::from_utf8_lossy(name);
    let password = String::from_utf8_lossy(password);
    if password.is_empty() {
        return 0;
    }
    match accounts.get(name.as_ref()) {
        Some(stored) if *stored == password => 0,
        _ => 49,
    }
}

fn bind_response(message_id: &[u8], code: u8) -> Vec<u8> {
    let mut body = vec![0x02, message_id.len() as u8];
    body.extend_from_slice(message_id);
    // BindResponse: resultCode, empty matchedDN, empty diagnosticMessage
    body.extend_from_slice(&[0x61, 0x07, 0x0a, 0x01, code, 0x04, 0x00, 0x04, 0x00]);

    let mut message = vec![0x30, body.len() as u8];
    message.extend_from_slice(&body);
    message
}

async fn read_length(stream: &mut TcpStream) -> io::Result<usize> {
    let first = stream.read_u8().await?;
    if first & 0x80 == 0 {
        return Ok(first as usize);
    }
    let mut len = 0usize;
    for _ in 0..(first & 0x7f) {
        len = (len << 8) | stream.read_u8().await? as usize;
    }
    Ok(len)
}

/// Split a BER TLV off the front of `buf`: (tag, value, rest).
fn split_tlv(buf: &[u8]) -> Option<(u8, &[u8], &[u8])> {
    let (&tag, rest) = buf.split_first()?;
    let (&first, mut rest) = rest.split_first()?;

    let len = if first & 0x80 == 0 {
        first as usize
    } else {
        let octets = (first & 0x7f) as usize;
        if rest.len() < octets {
            return None;
        }
        let (len_bytes, after) = rest.split_at(octets);
        rest = after;
        len_bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize)
    };

    if rest.len() < len {
        return None;
    }
    let (value, rest) = rest.split_at(len);
    Some((tag, value, rest))
}

/// A local port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
