//! Property-Based Tests for the Consistency Engine
//!
//! Drives random create/update/delete sequences through the engine and checks
//! that ids stay unique and both stores hold the same records after every step.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::engine::{EngineSettings, IncidentService};
use crate::error::IncidentError;
use crate::models::{IncidentDraft, IncidentUpdate};

// == Strategies ==
#[derive(Debug, Clone)]
enum EngineOp {
    Create { name: String },
    Update { id: u64, name: String },
    Delete { id: u64 },
    Advance { secs: u64 },
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,20}"
}

fn engine_op_strategy() -> impl Strategy<Value = EngineOp> {
    prop_oneof![
        4 => text_strategy().prop_map(|name| EngineOp::Create { name }),
        3 => (1u64..30, text_strategy()).prop_map(|(id, name)| EngineOp::Update { id, name }),
        2 => (1u64..30).prop_map(|id| EngineOp::Delete { id }),
        1 => (1u64..120).prop_map(|secs| EngineOp::Advance { secs }),
    ]
}

fn service() -> (IncidentService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let settings = EngineSettings {
        cache_capacity: 1_000,
        ..EngineSettings::default()
    };
    (IncidentService::with_clock(settings, clock.clone()), clock)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // With a cache that never refuses, table and cache agree after every step.
    #[test]
    fn prop_stores_stay_mirrored(ops in prop::collection::vec(engine_op_strategy(), 1..40)) {
        tokio_test::block_on(async {
            let (service, clock) = service();
            let mut seen_ids = HashSet::new();
            let mut live_ids = HashSet::new();

            for op in ops {
                match op {
                    EngineOp::Create { name } => {
                        let created = service.create(IncidentDraft::new(name, "d")).await.unwrap();
                        prop_assert!(seen_ids.insert(created.id), "id {} reused", created.id);
                        prop_assert_eq!(created.created_at, created.updated_at);
                        live_ids.insert(created.id);
                    }
                    EngineOp::Update { id, name } => {
                        match service.update(IncidentUpdate::new(id, name.clone(), "u")).await {
                            Ok(updated) => {
                                prop_assert!(live_ids.contains(&id));
                                prop_assert_eq!(updated.name, name);
                                prop_assert!(updated.updated_at >= updated.created_at);
                            }
                            Err(IncidentError::NotFound(missing)) => {
                                prop_assert_eq!(missing, id);
                                prop_assert!(!live_ids.contains(&id));
                            }
                            Err(other) => prop_assert!(false, "unexpected error {}", other),
                        }
                    }
                    EngineOp::Delete { id } => {
                        let result = service.delete(id).await;
                        prop_assert_eq!(result.is_ok(), live_ids.remove(&id));
                    }
                    EngineOp::Advance { secs } => clock.advance(Duration::from_secs(secs)),
                }

                prop_assert_eq!(service.table_snapshot().await, service.cache_snapshot().await);
            }

            prop_assert!(service.verify_consistency().await.is_consistent());
            prop_assert_eq!(service.table_len().await, live_ids.len());
            Ok(())
        })?;
    }

    // Listing returns exactly the live records when nothing was evicted.
    #[test]
    fn prop_list_matches_table(count in 0usize..50) {
        tokio_test::block_on(async {
            let (service, _) = service();
            for n in 0..count {
                service.create(IncidentDraft::new(format!("Incident {}", n), "d")).await.unwrap();
            }

            let listed = service.list().await;
            prop_assert_eq!(listed.len(), count);
            prop_assert_eq!(listed, service.table_snapshot().await);
            Ok(())
        })?;
    }
}
