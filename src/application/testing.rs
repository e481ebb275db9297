use std::{cell::RefCell, collections::VecDeque, time::Duration};

use crate::api::{client::Result, HttpClient, Transfer};

/// Replays a fixed list of transfer outcomes and records every URL asked for
pub struct ScriptedClient {
    script: RefCell<VecDeque<Result<Transfer>>>,
    requested: RefCell<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Result<Transfer>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn transfer(bytes: u64, seconds: f64) -> Result<Transfer> {
        Ok(Transfer {
            bytes,
            elapsed: Duration::from_secs_f64(seconds),
        })
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl HttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> Result<Transfer> {
        self.requested.borrow_mut().push(url.to_string());
        self.script
            .borrow_mut()
            .pop_front()
            .expect("scripted client ran out of transfers")
    }
}
