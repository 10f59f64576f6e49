//! Shared helpers for integration tests
//!
//! `StubServer` is a minimal HTTP/1.1 server on a loopback port that serves
//! fixed bodies for `/materials` and `/suppliers` and counts requests per
//! path. Every response closes the connection.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use material_finder::app::UpstreamEndpoints;

/// Canned response for one route
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

pub struct StubServer {
    addr: SocketAddr,
    material_hits: Arc<AtomicUsize>,
    supplier_hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(materials: Route, suppliers: Route) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let material_hits = Arc::new(AtomicUsize::new(0));
        let supplier_hits = Arc::new(AtomicUsize::new(0));

        let handle = {
            let material_hits = material_hits.clone();
            let supplier_hits = supplier_hits.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((mut socket, _)) = listener.accept().await else {
                        break;
                    };
                    let materials = materials.clone();
                    let suppliers = suppliers.clone();
                    let material_hits = material_hits.clone();
                    let supplier_hits = supplier_hits.clone();

                    tokio::spawn(async move {
                        let path = read_request_path(&mut socket).await;
                        let route = match path.as_str() {
                            "/materials" => {
                                material_hits.fetch_add(1, Ordering::SeqCst);
                                materials
                            }
                            "/suppliers" => {
                                supplier_hits.fetch_add(1, Ordering::SeqCst);
                                suppliers
                            }
                            _ => Route::status(404),
                        };

                        let response = format!(
                            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            route.status,
                            route.body.len(),
                            route.body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
            })
        };

        Self {
            addr,
            material_hits,
            supplier_hits,
            handle,
        }
    }

    pub fn endpoints(&self) -> UpstreamEndpoints {
        UpstreamEndpoints::parse(
            &format!("http://{}/materials", self.addr),
            &format!("http://{}/suppliers", self.addr),
        )
        .unwrap()
    }

    pub fn material_hits(&self) -> usize {
        self.material_hits.load(Ordering::SeqCst)
    }

    pub fn supplier_hits(&self) -> usize {
        self.supplier_hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read_request_path(socket: &mut tokio::net::TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    String::from_utf8_lossy(&request)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string()
}

pub fn materials_json() -> String {
    serde_json::json!([
        {"id": 1, "materialName": "Rebar", "materialType": "steel", "price": 80.0, "unit": "t", "rating": 3, "quality": 5},
        {"id": 2, "materialName": "Beam", "materialType": "steel", "price": 450.0, "unit": "t", "rating": 9, "quality": 5},
        {"id": 3, "materialName": "CopperWire", "materialType": "copper", "price": 12.5, "unit": "m", "rating": 4, "quality": 9}
    ])
    .to_string()
}

pub fn suppliers_json() -> String {
    serde_json::json!([
        {
            "id": 10,
            "supplierName": "Isar Steel",
            "supplierLocation": "Munich",
            "materials": {
                "steel": [
                    {"materialName": "Rebar", "stockAvailability": "In Stock", "stockQuantity": 40},
                    {"materialName": "Beam", "stockAvailability": "Low", "stockQuantity": 2}
                ]
            }
        },
        {
            "id": 20,
            "supplierName": "Spree Metals",
            "supplierLocation": "Berlin",
            "materials": {
                "copper": [
                    {"materialName": "CopperWire", "stockAvailability": "In Stock", "stockQuantity": 900}
                ]
            }
        },
        {
            "id": 30,
            "supplierName": "Bavaria Copper",
            "supplierLocation": "Munich",
            "materials": {
                "copper": [
                    {"materialName": "CopperWire", "stockAvailability": "In Stock", "stockQuantity": 120}
                ]
            }
        }
    ])
    .to_string()
}
