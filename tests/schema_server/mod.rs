use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Static JSON server: each path maps to a status and body; everything else is 404.
pub struct SchemaServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl SchemaServer {
    pub fn spawn(routes: &[(&str, u16, &str)]) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start schema server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(path, status, body)| ((*path).to_owned(), (*status, (*body).to_owned())))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let path = request.url().to_string();
                seen.lock().expect("lock requests").push(path.clone());

                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, "not found".to_owned()));
                let mut response = tiny_http::Response::from_string(body).with_status_code(status);
                if status == 200 {
                    let header = tiny_http::Header::from_bytes(
                        &b"Content-Type"[..],
                        &b"application/json"[..],
                    )
                    .expect("build header");
                    response = response.with_header(header);
                }
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock requests").clone()
    }
}

impl Drop for SchemaServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[allow(dead_code)]
pub const SUMMARY: &str = r#"{
  "generatedAt": "2024-05-01T10:20:30Z",
  "pageCount": 3,
  "pages": [
    { "pageId": "login", "output": "login.json", "forms": 1, "fields": 2, "confidence": "HIGH", "confidenceScore": 0.91 },
    { "pageId": "missing", "confidence": "low" },
    { "pageId": "orders", "output": "/pages/orders.json", "frames": 2, "frameset": true },
    { "forms": 9 }
  ]
}"#;

#[allow(dead_code)]
pub const LOGIN: &str = r#"{
  "pageId": "login",
  "title": "Sign in",
  "forms": [
    {
      "formId": "loginForm",
      "action": "/login.do",
      "method": "POST",
      "fields": [
        { "name": "user", "type": "text", "required": true, "maxLength": 32 },
        { "name": "password", "type": "password" }
      ]
    }
  ],
  "metadata": { "confidence": "HIGH", "controllerCandidates": ["com.acme.LoginController"] }
}"#;

#[allow(dead_code)]
pub const ORDERS: &str = r#"{
  "pageId": "orders",
  "title": "Orders",
  "frameDefinitions": [
    { "frameName": "top", "source": "header.jsp", "tag": "frame", "depth": 1 },
    { "frameName": "main", "source": "orders-list.jsp" }
  ]
}"#;
