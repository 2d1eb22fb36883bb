use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    Answer,
    /// Swallows every query.
    Silent,
    /// Answers with an ID that does not match the query.
    WrongId,
    /// Sends a reply with a mismatched ID, then the real answer.
    StaleThenAnswer,
}

/// UDP DNS server on 127.0.0.1 answering from a per-name table.
pub struct MockDnsServer {
    addr: SocketAddr,
    answers: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    authority: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let answers: Arc<Mutex<HashMap<String, Vec<Record>>>> = Arc::default();
        let authority: Arc<Mutex<HashMap<String, Vec<Record>>>> = Arc::default();
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let table = Arc::clone(&answers);
        let authority_table = Arc::clone(&authority);
        let counter = Arc::clone(&queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        if mode == MockMode::Silent {
                            continue;
                        }
                        if mode == MockMode::StaleThenAnswer {
                            if let Some(stale) =
                                Self::build_response(&buf[..len], true, &table, &authority_table)
                            {
                                let _ = socket.send_to(&stale, peer).await;
                            }
                        }
                        let wrong_id = mode == MockMode::WrongId;
                        let Some(response) =
                            Self::build_response(&buf[..len], wrong_id, &table, &authority_table)
                        else {
                            continue;
                        };
                        let _ = socket.send_to(&response, peer).await;
                    }
                }
            }
        });

        Ok(Self {
            addr,
            answers,
            authority,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn add_answer(&self, name: &str, ttl: u32, rdata: RData) {
        let owner = Name::from_str(&format!("{}.", name)).unwrap();
        let record = Record::from_rdata(owner, ttl, rdata);
        self.answers
            .lock()
            .unwrap()
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(record);
    }

    pub fn add_authority(&self, name: &str, owner: &str, ttl: u32, rdata: RData) {
        let owner = Name::from_str(&format!("{}.", owner)).unwrap();
        let record = Record::from_rdata(owner, ttl, rdata);
        self.authority
            .lock()
            .unwrap()
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(record);
    }

    fn build_response(
        query: &[u8],
        wrong_id: bool,
        answers: &Mutex<HashMap<String, Vec<Record>>>,
        authority: &Mutex<HashMap<String, Vec<Record>>>,
    ) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;
        let question = request.queries().first()?.clone();
        let key = question
            .name()
            .to_utf8()
            .trim_end_matches('.')
            .to_ascii_lowercase();

        let mut response = Message::new();
        let id = if wrong_id {
            request.id().wrapping_add(1)
        } else {
            request.id()
        };
        response
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true);
        response.add_query(question);

        let found = answers.lock().unwrap().get(&key).cloned();
        let extra = authority.lock().unwrap().get(&key).cloned();
        match (found, extra) {
            (None, None) => {
                response.set_response_code(ResponseCode::NXDomain);
            }
            (found, extra) => {
                for record in found.unwrap_or_default() {
                    response.add_answer(record);
                }
                for record in extra.unwrap_or_default() {
                    response.add_name_server(record);
                }
            }
        }

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).ok()?;
        Some(buf)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
