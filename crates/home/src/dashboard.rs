use ecopulse_core::common::{Asset, SignalKind};
use ecopulse_core::market::error::FetchError;
use ecopulse_core::market::port::PriceSeriesProvider;
use ecopulse_core::signal::entity::{ChangeResult, RiskAssessment, Signal};
use ecopulse_core::signal::error::SignalError;
use ecopulse_signal::change;
use ecopulse_signal::format::format_change;
use ecopulse_signal::risk::RiskScorer;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// # Summary
/// 小部件加载失败的统一错误类型。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}

/// # Summary
/// 单个涨跌小部件的展示状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceState {
    Loading,
    Ready { change: ChangeResult, label: String },
    // 提示文本在 `HomeView::notices` 中
    Failed,
}

/// # Summary
/// 首页的完整展示状态。
///
/// # Invariants
/// - 只由 `HomeScreen` 在消费事件时修改。
/// - 各小部件互不影响，一个失败不会改动另一个。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    // 衰退评分，股票小部件就绪前为空
    pub recession: Option<RiskAssessment>,
    pub equity: SliceState,
    pub gold: SliceState,
    // 待展示的一次性提示
    pub notices: Vec<String>,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            recession: None,
            equity: SliceState::Loading,
            gold: SliceState::Loading,
            notices: Vec::new(),
        }
    }
}

impl HomeView {
    fn slice_mut(&mut self, kind: SignalKind) -> Option<&mut SliceState> {
        match kind {
            SignalKind::Equity => Some(&mut self.equity),
            SignalKind::Gold => Some(&mut self.gold),
            SignalKind::Crypto => None,
        }
    }

    /// 所有已就绪小部件的信号。
    pub fn ready_signals(&self) -> Vec<Signal> {
        [
            (SignalKind::Equity, &self.equity),
            (SignalKind::Gold, &self.gold),
        ]
        .into_iter()
        .filter_map(|(kind, slice)| match slice {
            SliceState::Ready { change, .. } => Some(Signal::new(kind, *change)),
            _ => None,
        })
        .collect()
    }
}

/// # Summary
/// 后台任务回传的加载结果，带有加载代次。
#[derive(Debug, Clone)]
pub struct HomeEvent {
    pub generation: u64,
    pub kind: SignalKind,
    pub result: Result<ChangeResult, WidgetError>,
}

/// # Summary
/// 一个涨跌小部件的数据来源。
#[derive(Clone)]
pub struct Widget {
    pub asset: Asset,
    pub provider: Arc<dyn PriceSeriesProvider>,
}

impl Widget {
    pub fn new(asset: Asset, provider: Arc<dyn PriceSeriesProvider>) -> Self {
        Self { asset, provider }
    }
}

/// 加载失败时展示的提示文本。
pub fn failure_notice(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::Equity => "Failed to load stock data",
        SignalKind::Gold => "Failed to load gold data",
        SignalKind::Crypto => "Failed to load crypto data",
    }
}

/// # Summary
/// 抓取序列并计算涨跌幅。
///
/// # Logic
/// 1. 按窗口抓取序列。
/// 2. 根据数据源采样方式换算回看步数。
/// 3. 计算涨跌幅。
pub async fn fetch_change(
    provider: &dyn PriceSeriesProvider,
    asset: &Asset,
    window: usize,
) -> Result<ChangeResult, WidgetError> {
    let series = provider.fetch(asset, window).await?;
    let lookback = provider.sampling().lookback(window);
    Ok(change::compute(&series, lookback)?)
}

/// # Summary
/// 首页看板，展示状态的唯一持有者。
///
/// # Invariants
/// - 每个小部件对应一个 tokio 任务，结果经 mpsc 通道回到持有者后才写入视图。
/// - 重新加载会中止上一代任务，旧代次的事件一律丢弃。
/// - 释放时中止所有未完成的任务。
pub struct HomeScreen {
    widgets: Vec<Widget>,
    scorer: RiskScorer,
    // 尾部窗口长度
    window: usize,
    view: HomeView,
    // 当前加载代次，每次 load 自增
    generation: u64,
    tasks: Vec<JoinHandle<()>>,
    // 当前代次尚未回传的结果数
    pending: usize,
    rx: mpsc::UnboundedReceiver<HomeEvent>,
}

impl HomeScreen {
    /// # Summary
    /// 创建首页看板，尚未发起任何加载。
    ///
    /// # Arguments
    /// * `widgets`: 各涨跌小部件的数据来源。
    /// * `scorer`: 风险评分器。
    /// * `window`: 尾部窗口长度。
    pub fn new(widgets: Vec<Widget>, scorer: RiskScorer, window: usize) -> Self {
        // 发送端立即释放，首次 load 之前 settle 直接返回
        let (_, rx) = mpsc::unbounded_channel();
        Self {
            widgets,
            scorer,
            window,
            view: HomeView::default(),
            generation: 0,
            tasks: Vec::new(),
            pending: 0,
            rx,
        }
    }

    pub fn view(&self) -> &HomeView {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 当前一代是否还有未回传的结果。
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// 取走并清空待展示的提示。
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.view.notices)
    }

    /// # Summary
    /// 发起新一轮加载。
    ///
    /// # Logic
    /// 1. 中止上一代的所有任务，换用新通道。
    /// 2. 代次自增，失败的小部件回到 `Loading`，已就绪的保留旧值。
    /// 3. 为每个小部件启动一个抓取任务。
    pub fn load(&mut self) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);

        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = rx;

        for widget in &self.widgets {
            if let Some(slice) = self.view.slice_mut(widget.asset.kind)
                && *slice == SliceState::Failed
            {
                *slice = SliceState::Loading;
            }

            let tx = tx.clone();
            let widget = widget.clone();
            let generation = self.generation;
            let window = self.window;
            self.tasks.push(tokio::spawn(async move {
                let result = fetch_change(widget.provider.as_ref(), &widget.asset, window).await;
                let event = HomeEvent {
                    generation,
                    kind: widget.asset.kind,
                    result,
                };
                if tx.send(event).is_err() {
                    debug!("Home screen gone, dropping {} result", widget.asset.kind);
                }
            }));
        }
        self.pending = self.tasks.len();
        debug!(
            "Home load generation {} started with {} widgets",
            self.generation,
            self.tasks.len()
        );
    }

    /// # Summary
    /// 消费通道中已到达的事件，不等待。
    ///
    /// # Returns
    /// 本次处理的事件数量。
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event);
            handled += 1;
        }
        handled
    }

    /// # Summary
    /// 等待下一个结果并应用。
    ///
    /// # Returns
    /// 通道已关闭 (无未完成任务) 时返回 `false`。
    pub async fn next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => {
                self.pending = 0;
                self.tasks.clear();
                false
            }
        }
    }

    /// 等待当前一代的所有任务结束并应用其结果。
    pub async fn settle(&mut self) {
        while self.next_event().await {}
    }

    /// # Summary
    /// 将一个加载结果写入视图。
    ///
    /// # Logic
    /// 1. 丢弃旧代次的事件。
    /// 2. 成功：小部件就绪。
    /// 3. 失败：记录日志并追加提示；之前已就绪的保留原值，否则标记为失败。
    /// 4. 股票小部件就绪后，每个结果都按全部已就绪信号重新计算衰退评分，与到达顺序无关。
    pub fn apply(&mut self, event: HomeEvent) {
        if event.generation != self.generation {
            debug!(
                "Discarding stale {} result from generation {}",
                event.kind, event.generation
            );
            return;
        }
        self.pending = self.pending.saturating_sub(1);
        let Some(slice) = self.view.slice_mut(event.kind) else {
            debug!("No widget slot for {}", event.kind);
            return;
        };

        match event.result {
            Ok(change) => {
                *slice = SliceState::Ready {
                    change,
                    label: format_change(&change),
                };
            }
            Err(e) => {
                warn!("Failed to load {} widget: {}", event.kind, e);
                if !matches!(slice, SliceState::Ready { .. }) {
                    *slice = SliceState::Failed;
                }
                self.view
                    .notices
                    .push(failure_notice(event.kind).to_string());
            }
        }
        self.rescore();
    }

    fn rescore(&mut self) {
        if !matches!(self.view.equity, SliceState::Ready { .. }) {
            return;
        }
        let assessment = self.scorer.score(&self.view.ready_signals());
        debug!(
            "Recession score {} ({})",
            assessment.score, assessment.category
        );
        self.view.recession = Some(assessment);
    }

    /// 中止所有未完成的加载任务，已写入视图的结果保持不变。
    pub fn cancel(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.pending = 0;
    }
}

impl Drop for HomeScreen {
    fn drop(&mut self) {
        self.cancel();
    }
}
