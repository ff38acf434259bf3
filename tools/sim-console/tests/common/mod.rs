//! In-memory backend for driving the console without HTTP.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::timeout;

use sim_analytics::{
    AnalyticsSnapshot, Balances, Block, DecentralizationMetrics, MineRequest, NetworkParams,
    ParamsUpdate, Transaction, TransferRequest,
};
use sim_console::{ApiError, App, Completion, Console, ConsoleConfig, SimApi};

/// Canned backend. A `None` slot makes that endpoint fail.
pub struct FakeApi {
    pub analytics: Mutex<Option<AnalyticsSnapshot>>,
    pub balances: Mutex<Option<Balances>>,
    pub mempool: Mutex<Option<Vec<Transaction>>>,
    pub chain: Mutex<Option<Vec<Block>>>,
    pub transactions: Mutex<Option<Vec<Transaction>>>,
    pub accept_writes: Mutex<bool>,

    /// Per-endpoint delays, consumed one per call.
    delays: Mutex<HashMap<&'static str, VecDeque<Duration>>>,

    pub calls: Mutex<Vec<&'static str>>,
    pub params_updates: Mutex<Vec<ParamsUpdate>>,
    pub transfers: Mutex<Vec<TransferRequest>>,
    pub mined: Mutex<Vec<MineRequest>>,
}

impl FakeApi {
    /// A backend with a small healthy network.
    pub fn healthy() -> Self {
        Self {
            analytics: Mutex::new(Some(analytics())),
            balances: Mutex::new(Some(Balances::from([
                ("alice".to_string(), 50.0),
                ("bob".to_string(), 5.0),
            ]))),
            mempool: Mutex::new(Some(Vec::new())),
            chain: Mutex::new(Some(Vec::new())),
            transactions: Mutex::new(Some(Vec::new())),
            accept_writes: Mutex::new(true),
            delays: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            params_updates: Mutex::new(Vec::new()),
            transfers: Mutex::new(Vec::new()),
            mined: Mutex::new(Vec::new()),
        }
    }

    /// Delay the next call to `endpoint`.
    pub fn delay_next(&self, endpoint: &'static str, by: Duration) {
        self.delays
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(by);
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    async fn respond<T: Clone>(
        &self,
        endpoint: &'static str,
        slot: &Mutex<Option<T>>,
    ) -> Result<T, ApiError> {
        let value = slot.lock().unwrap().clone();
        self.enter(endpoint).await;
        value.ok_or_else(|| ApiError::Connection(format!("{endpoint} unavailable")))
    }

    async fn write(&self, endpoint: &'static str) -> Result<(), ApiError> {
        self.enter(endpoint).await;
        if *self.accept_writes.lock().unwrap() {
            Ok(())
        } else {
            Err(ApiError::Status {
                endpoint,
                status: 400,
                message: "rejected".to_string(),
            })
        }
    }

    async fn enter(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SimApi for FakeApi {
    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        self.respond("/analytics", &self.analytics).await
    }

    async fn balances(&self) -> Result<Balances, ApiError> {
        self.respond("/balances", &self.balances).await
    }

    async fn mempool(&self) -> Result<Vec<Transaction>, ApiError> {
        self.respond("/mempool", &self.mempool).await
    }

    async fn chain(&self) -> Result<Vec<Block>, ApiError> {
        self.respond("/chain", &self.chain).await
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.respond("/transactions", &self.transactions).await
    }

    async fn update_params(&self, update: &ParamsUpdate) -> Result<(), ApiError> {
        self.params_updates.lock().unwrap().push(update.clone());
        self.write("/update_params").await
    }

    async fn send_transaction(
        &self,
        request: &TransferRequest,
    ) -> Result<Option<String>, ApiError> {
        self.transfers.lock().unwrap().push(request.clone());
        self.write("/api/send").await?;
        Ok(Some("f00dfeedf00dfeedf00dfeed".to_string()))
    }

    async fn mine_block(&self, request: &MineRequest) -> Result<(), ApiError> {
        self.mined.lock().unwrap().push(request.clone());
        self.write("/api/mine").await
    }
}

pub fn analytics() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        total_blocks: 3,
        total_transactions: 7,
        mempool_size: 0,
        average_block_size: 1536.0,
        network_params: NetworkParams {
            block_size_limit: 1_000_000,
            mining_difficulty: 4,
            transaction_fee: 0.001,
            block_time_target: 10,
            max_transactions_per_block: 100,
        },
        decentralization_metrics: DecentralizationMetrics {
            gini_coefficient: 0.2,
            herfindahl_index: 0.1,
            top_miners_concentration: 10.0,
        },
        ..Default::default()
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub console: Console,
    pub completions: mpsc::UnboundedReceiver<Completion>,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let (tx, completions) = mpsc::unbounded_channel();
        let console = Console::new(
            App::new(&ConsoleConfig::default()),
            Arc::clone(&api) as Arc<dyn SimApi>,
            tx,
        );
        Self {
            api,
            console,
            completions,
        }
    }

    /// Wait for the next completion and feed it to the console.
    pub async fn settle_one(&mut self) {
        let completion = timeout(Duration::from_secs(60), self.completions.recv())
            .await
            .expect("completion within timeout")
            .expect("channel open");
        self.console
            .handle_completion(completion, std::time::Instant::now());
    }

    /// True if no completion arrives within `window`.
    pub async fn quiet_for(&mut self, window: Duration) -> bool {
        timeout(window, self.completions.recv()).await.is_err()
    }
}
