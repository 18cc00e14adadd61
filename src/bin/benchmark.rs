use chrono::{Duration as ChronoDuration, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const DURATION_SECS: u64 = 20;
const BASE_URL: &str = "http://localhost:8080";

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    body: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", BASE_URL);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", BASE_URL)).send().await.is_err() {
        eprintln!("{}", "❌ Server is NOT reachable at localhost:8080. Please start it first.".red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let room_ids = setup_rooms(&client).await;
    setup_bookings(&client, &room_ids).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Rooms: {}", room_ids.len());

    let start_date = Utc::now().date_naive();
    let end_date = start_date + ChronoDuration::days(6);
    let timeline_query = format!(
        "start_date={}&end_date={}&repeat=daily&start_time=09:00&end_time=10:00",
        start_date.format("%Y-%m-%d"),
        end_date.format("%Y-%m-%d"),
    );

    let targets = vec![
        Target {
            name: "Health Check (Public)",
            method: "GET",
            url: format!("{}/health", BASE_URL),
            body: None,
        },
        Target {
            name: "List Rooms (Read)",
            method: "GET",
            url: format!("{}/api/v1/rooms", BASE_URL),
            body: None,
        },
        Target {
            name: "Timeline, Single Room (7 Days)",
            method: "GET",
            url: format!("{}/api/v1/timeline?{}&rooms={}", BASE_URL, timeline_query, room_ids[0]),
            body: None,
        },
        Target {
            name: "Timeline, All Rooms (7 Days)",
            method: "GET",
            url: format!("{}/api/v1/timeline?{}", BASE_URL, timeline_query),
            body: None,
        },
        Target {
            name: "Create Room (Write)",
            method: "POST",
            url: format!("{}/api/v1/rooms", BASE_URL),
            body: Some(json!({
                "name": "Benchmark Annex",
                "building": "900",
                "floor": "9",
                "number": "099",
                "capacity": 8
            })),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn setup_rooms(client: &Client) -> Vec<String> {
    let rooms = vec![
        json!({
            "name": "Aquarium",
            "building": "500", "floor": "1", "number": "001",
            "capacity": 20
        }),
        json!({
            "name": "Pagoda",
            "building": "500", "floor": "1", "number": "002",
            "capacity": 8,
            "bookable_hours": [{"start": "08:00", "end": "20:00"}]
        }),
        json!({
            "name": "Pine Tree",
            "building": "500", "floor": "2", "number": "021",
            "capacity": 12,
            "reservations_need_confirmation": true
        }),
        json!({
            "name": "Library",
            "building": "513", "floor": "1", "number": "005",
            "capacity": 40
        }),
        json!({
            "name": "Bunker",
            "building": "513", "floor": "0", "number": "001",
            "capacity": 4
        }),
    ];

    let mut ids = Vec::new();
    for payload in rooms {
        let res = client.post(format!("{}/api/v1/rooms", BASE_URL))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send room create request");

        if !res.status().is_success() {
            panic!("Failed to create room: status {}", res.status());
        }

        let body: Value = res.json().await.expect("Failed to parse room response");
        ids.push(body["id"].as_str().expect("No room id").to_string());
    }
    ids
}

async fn setup_bookings(client: &Client, room_ids: &[String]) {
    let today = Utc::now().date_naive();

    for (i, room_id) in room_ids.iter().enumerate() {
        for day in 0..3 {
            let date = today + ChronoDuration::days(day);
            // staggered hours so the seed bookings never collide
            let start_hour = 9 + (i % 3) * 2;
            let payload = json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "start_time": format!("{:02}:00", start_hour),
                "end_time": format!("{:02}:00", start_hour + 1),
                "booked_for": "Benchmark Bot",
                "reason": "load test fixture"
            });

            let res = client.post(format!("{}/api/v1/rooms/{}/bookings", BASE_URL, room_id))
                .json(&payload)
                .send()
                .await
                .expect("Failed to send booking create request");

            if !res.status().is_success() {
                let status = res.status();
                let txt = res.text().await.unwrap_or_default();
                panic!("Failed to create booking. Status: {}. Body: {}", status, txt);
            }
        }
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match method {
                    "GET" => client.get(&url).send().await,
                    "POST" => {
                        let mut req = client.post(&url);
                        if let Some(b) = body {
                            req = req.json(&b);
                        }
                        req.send().await
                    },
                    _ => client.get(&url).send().await,
                };
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
