use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub transport_failures: usize,
    pub retry_count: usize,
    pub bytes_downloaded: usize,
    pub status_codes: HashMap<u16, usize>,
    pub average_response_time: f64, // in milliseconds
    pub cells_selected: usize,
    pub records_parsed: usize,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                transport_failures: 0,
                retry_count: 0,
                bytes_downloaded: 0,
                status_codes: HashMap::new(),
                average_response_time: 0.0,
                cells_selected: 0,
                records_parsed: 0,
            })),
        }
    }

    pub fn record_request(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;

        if (200..300).contains(&status) {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }

        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;

        let answered = stats.total_requests - stats.transport_failures;
        let current_total = stats.average_response_time * (answered - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_response_time = (current_total + new_duration) / answered as f64;
    }

    /// Requests that never produced a response (connection refused, timeout).
    pub fn record_transport_failure(&self) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;
        stats.failed_requests += 1;
        stats.transport_failures += 1;
    }

    pub fn record_retry(&self) {
        self.stats.write().retry_count += 1;
    }

    pub fn record_parse(&self, cells: usize, records: usize) {
        let mut stats = self.stats.write();
        stats.cells_selected += cells;
        stats.records_parsed += records;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nScraping Statistics:");
        println!("===================");
        println!("Duration: {} ms", duration.num_milliseconds());
        println!("Total Requests: {}", stats.total_requests);
        println!("Successful Requests: {}", stats.successful_requests);
        println!("Failed Requests: {}", stats.failed_requests);
        println!("Transport Failures: {}", stats.transport_failures);
        println!("Retry Count: {}", stats.retry_count);
        println!("Data Downloaded: {:.2} KB", stats.bytes_downloaded as f64 / 1_000.0);
        println!(
            "Average Response Time: {:.2}ms",
            stats.average_response_time
        );
        println!("Day Cells Selected: {}", stats.cells_selected);
        println!("Records Parsed: {}", stats.records_parsed);

        println!("\nStatus Codes:");
        let mut codes: Vec<_> = stats.status_codes.iter().collect();
        codes.sort();
        for (code, count) in codes {
            println!("  {}: {}", code, count);
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
