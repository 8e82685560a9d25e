// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account-deletion cascade tests.

use hydro_tracker::models::DailyRecord;
use hydro_tracker::time_utils::DayKey;

mod common;
use common::{test_db, test_user, unique_uid};

fn day(s: &str) -> DayKey {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_delete_user_data_removes_everything() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    db.upsert_user(&test_user(&uid)).await.unwrap();
    for d in ["2024-03-07", "2024-03-08", "2024-03-09"] {
        db.set_daily_record(&uid, &DailyRecord::new(day(d), 2000, 0, "t0"))
            .await
            .unwrap();
    }

    let deleted = db.delete_user_data(&uid).await.unwrap();
    assert_eq!(deleted, 4); // 3 records + user document

    assert!(db.get_user(&uid).await.unwrap().is_none());
    for d in ["2024-03-07", "2024-03-08", "2024-03-09"] {
        assert!(db.get_daily_record(&uid, day(d)).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_delete_user_without_records() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    db.upsert_user(&test_user(&uid)).await.unwrap();

    let deleted = db.delete_user_data(&uid).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(db.get_user(&uid).await.unwrap().is_none());
}

#[tokio::test]
async fn test_deletion_does_not_touch_other_users() {
    require_emulator!();

    let db = test_db().await;
    let victim = unique_uid();
    let bystander = unique_uid();

    for uid in [&victim, &bystander] {
        db.upsert_user(&test_user(uid)).await.unwrap();
        db.set_daily_record(uid, &DailyRecord::new(day("2024-03-09"), 2000, 0, "t0"))
            .await
            .unwrap();
    }

    db.delete_user_data(&victim).await.unwrap();

    assert!(db.get_user(&bystander).await.unwrap().is_some());
    assert!(db
        .get_daily_record(&bystander, day("2024-03-09"))
        .await
        .unwrap()
        .is_some());
}
