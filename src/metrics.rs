//! 性能指标收集模块
//!
//! 统计各算法的调用次数与耗时，支持导出 Prometheus 文本格式

use crate::algorithm::Algorithm;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 单个算法的统计
#[derive(Debug, Default)]
struct AlgorithmStats {
    /// 调用次数
    runs: AtomicU64,
    /// 总耗时（微秒）
    total_duration_us: AtomicU64,
}

impl AlgorithmStats {
    fn record(&self, duration: Duration) {
        self.runs.fetch_add(1, Ordering::Relaxed);
        self.total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    fn avg_duration_ms(&self) -> f64 {
        let runs = self.runs();
        if runs == 0 {
            return 0.0;
        }
        (self.total_duration_us.load(Ordering::Relaxed) as f64) / (runs as f64) / 1000.0
    }

    fn reset(&self) {
        self.runs.store(0, Ordering::Relaxed);
        self.total_duration_us.store(0, Ordering::Relaxed);
    }
}

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    mst: AlgorithmStats,
    max_flow: AlgorithmStats,
    shortest_paths: AlgorithmStats,
    /// 找到的增广路径总数
    augmenting_paths: AtomicU64,
    /// 检测到负权环的次数
    negative_cycles: AtomicU64,
    /// 失败的请求数
    failed_requests: AtomicU64,
    /// 启动时间
    start_time: Instant,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub mst_runs: u64,
    pub max_flow_runs: u64,
    pub shortest_path_runs: u64,
    pub mst_avg_duration_ms: f64,
    pub max_flow_avg_duration_ms: f64,
    pub shortest_path_avg_duration_ms: f64,
    pub augmenting_paths: u64,
    pub negative_cycles: u64,
    pub failed_requests: u64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            mst: AlgorithmStats::default(),
            max_flow: AlgorithmStats::default(),
            shortest_paths: AlgorithmStats::default(),
            augmenting_paths: AtomicU64::new(0),
            negative_cycles: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    fn stats(&self, algorithm: Algorithm) -> &AlgorithmStats {
        match algorithm {
            Algorithm::Mst => &self.mst,
            Algorithm::MaxFlow => &self.max_flow,
            Algorithm::ShortestPaths => &self.shortest_paths,
        }
    }

    /// 开始计时
    pub fn start_timer(&self) -> RunTimer {
        RunTimer::new()
    }

    /// 记录一次算法调用
    pub fn record_run(&self, algorithm: Algorithm, timer: RunTimer) {
        self.stats(algorithm).record(timer.elapsed());
    }

    /// 记录增广路径数
    pub fn record_augmenting_paths(&self, count: usize) {
        self.augmenting_paths
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// 记录负权环
    pub fn record_negative_cycle(&self) {
        self.negative_cycles.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录失败请求
    pub fn record_failure(&self) {
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            mst_runs: self.mst.runs(),
            max_flow_runs: self.max_flow.runs(),
            shortest_path_runs: self.shortest_paths.runs(),
            mst_avg_duration_ms: self.mst.avg_duration_ms(),
            max_flow_avg_duration_ms: self.max_flow.avg_duration_ms(),
            shortest_path_avg_duration_ms: self.shortest_paths.avg_duration_ms(),
            augmenting_paths: self.augmenting_paths.load(Ordering::Relaxed),
            negative_cycles: self.negative_cycles.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let mut content = String::new();

        content.push_str("# HELP patrolgraph_algorithm_runs_total Number of algorithm runs\n");
        content.push_str("# TYPE patrolgraph_algorithm_runs_total counter\n");
        for algorithm in Algorithm::ALL {
            content.push_str(&format!(
                "patrolgraph_algorithm_runs_total{{algorithm=\"{}\"}} {}\n",
                algorithm,
                self.stats(algorithm).runs()
            ));
        }

        content.push_str(
            "# HELP patrolgraph_algorithm_duration_avg_ms Average algorithm duration in milliseconds\n",
        );
        content.push_str("# TYPE patrolgraph_algorithm_duration_avg_ms gauge\n");
        for algorithm in Algorithm::ALL {
            content.push_str(&format!(
                "patrolgraph_algorithm_duration_avg_ms{{algorithm=\"{}\"}} {:.3}\n",
                algorithm,
                self.stats(algorithm).avg_duration_ms()
            ));
        }

        let snapshot = self.snapshot();

        content.push_str(
            "# HELP patrolgraph_augmenting_paths_total Augmenting paths found by max-flow\n",
        );
        content.push_str("# TYPE patrolgraph_augmenting_paths_total counter\n");
        content.push_str(&format!(
            "patrolgraph_augmenting_paths_total {}\n",
            snapshot.augmenting_paths
        ));

        content.push_str(
            "# HELP patrolgraph_negative_cycles_total Negative cycles detected by shortest-path\n",
        );
        content.push_str("# TYPE patrolgraph_negative_cycles_total counter\n");
        content.push_str(&format!(
            "patrolgraph_negative_cycles_total {}\n",
            snapshot.negative_cycles
        ));

        content.push_str("# HELP patrolgraph_failed_requests_total Rejected requests\n");
        content.push_str("# TYPE patrolgraph_failed_requests_total counter\n");
        content.push_str(&format!(
            "patrolgraph_failed_requests_total {}\n",
            snapshot.failed_requests
        ));

        content.push_str("# HELP patrolgraph_uptime_seconds System uptime in seconds\n");
        content.push_str("# TYPE patrolgraph_uptime_seconds counter\n");
        content.push_str(&format!("patrolgraph_uptime_seconds {}\n", snapshot.uptime_seconds));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        for algorithm in Algorithm::ALL {
            self.stats(algorithm).reset();
        }
        self.augmenting_paths.store(0, Ordering::Relaxed);
        self.negative_cycles.store(0, Ordering::Relaxed);
        self.failed_requests.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 算法计时器
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
