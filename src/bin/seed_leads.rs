//! Script to fill the leads table with dummy data.
//!
//! Usage: `seed_leads [COUNT]` (default 50).

use chrono::Utc;
use uuid::Uuid;

use lead_capture_api::config::Config;
use lead_capture_api::db::Database;
use lead_capture_api::db_storage::PgLeadStore;
use lead_capture_api::models::{LeadStatus, NewLead};
use lead_capture_api::store::LeadStore;

const FIRST_NAMES: [&str; 8] = [
    "Ana", "Bruno", "Carla", "Diego", "Elena", "Felipe", "Grace", "Hiro",
];
const LAST_NAMES: [&str; 6] = ["Silva", "Okafor", "Nguyen", "Schmidt", "Rossi", "Kumar"];
const FEEDBACK: [&str; 5] = [
    "Interested in a product demo next week.",
    "Asked for pricing on the annual plan.",
    "Wants a callback in the afternoon.",
    "Found us through a friend, curious about onboarding.",
    "Comparing options, send a brochure.",
];

/// `width` bits of `noise` starting at `shift`.
fn window(noise: u128, shift: u32, width: u32) -> u128 {
    (noise >> shift) & ((1u128 << width) - 1)
}

/// Builds the `index`-th dummy lead; `stamp` keeps emails unique across runs.
fn dummy_lead(index: usize, stamp: i64) -> NewLead {
    dummy_lead_from(index, stamp, Uuid::new_v4().as_u128())
}

/// Each pick reads its own bits of `noise`: bytes 0-2 pick name and feedback,
/// bit 24 the status, bits 80-127 the phone. A v4 UUID's version and variant
/// bits (56-79) are never read.
fn dummy_lead_from(index: usize, stamp: i64, noise: u128) -> NewLead {
    let pick = |len: usize, shift: u32| (window(noise, shift, 8) % len as u128) as usize;

    NewLead {
        name: format!(
            "{} {}",
            FIRST_NAMES[pick(FIRST_NAMES.len(), 0)],
            LAST_NAMES[pick(LAST_NAMES.len(), 8)]
        ),
        email: format!("dummy{}{}@gmail.com", stamp, index),
        phone: Some(format!("9{:09}", window(noise, 80, 48) % 1_000_000_000)),
        feedback: Some(FEEDBACK[pick(FEEDBACK.len(), 16)].to_string()),
        status: if window(noise, 24, 1) == 0 {
            LeadStatus::New
        } else {
            LeadStatus::Contacted
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let count = match std::env::args().nth(1) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("COUNT must be a positive number, got {:?}", raw))?,
        None => 50,
    };

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let store = PgLeadStore::new(db.pool.clone());
    tracing::info!("Connected to database. Inserting {} dummy leads...", count);

    let stamp = Utc::now().timestamp_millis();
    let mut inserted = 0;
    for index in 0..count {
        match store.insert(dummy_lead(index, stamp)).await {
            Ok(_) => inserted += 1,
            // Random phones can collide with existing rows; skip those.
            Err(e) => tracing::warn!("Skipping dummy lead {}: {}", index, e),
        }
    }

    tracing::info!("{} of {} dummy leads inserted", inserted, count);
    db.close().await;

    Ok(())
}
