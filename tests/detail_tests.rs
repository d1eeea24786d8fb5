//! Integration tests for the shot detail analyzer over a real
//! temp-dir database.

use chrono::{Duration, Utc};
use dialin::{
    analyze_shot_detail, BeanInput, BrewTuning, CoreError, Database, RecommendationKind, Shot,
    ShotInput, TastePrimary,
};

fn open_database(dir: &tempfile::TempDir) -> Database {
    Database::new(dir.path().join("dialin.sqlite3")).unwrap()
}

async fn seed_bean(db: &Database, name: &str, roast_days_ago: i64) -> String {
    db.create_bean(BeanInput {
        name: name.to_string(),
        roaster: Some("Test Roasters".to_string()),
        roast_date: Some((Utc::now() - Duration::days(roast_days_ago)).date_naive()),
        notes: None,
    })
    .await
    .unwrap()
    .id
}

async fn seed_shot(db: &Database, bean_id: &str, time: i64, taste: Option<TastePrimary>) -> Shot {
    db.record_shot(ShotInput {
        bean_id: bean_id.to_string(),
        weight_in_grams: 18.0,
        weight_out_grams: 36.0,
        extraction_time_secs: time,
        grinder_setting: "15.0".to_string(),
        taste_primary: taste,
        taste_secondary: None,
        notes: None,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn report_composes_neighbors_ranking_and_bean_context() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(&dir);
    let tuning = BrewTuning::default();

    let bean_id = seed_bean(&db, "Ranked Bean", 10).await;
    let s1 = seed_shot(&db, &bean_id, 22, Some(TastePrimary::Sour)).await;
    let s2 = seed_shot(&db, &bean_id, 24, None).await;
    let s3 = seed_shot(&db, &bean_id, 26, None).await;
    let s4 = seed_shot(&db, &bean_id, 28, Some(TastePrimary::Perfect)).await;
    let s5 = seed_shot(&db, &bean_id, 35, Some(TastePrimary::Bitter)).await;

    let report = analyze_shot_detail(&db, &s4.id, &tuning).await.unwrap();

    assert_eq!(report.shot.id, s4.id);
    assert_eq!(report.bean.id, bean_id);
    assert_eq!(report.days_since_roast, Some(10));
    assert_eq!(report.related_shot_count, 5);
    assert_eq!(
        report.previous_shot.as_ref().map(|s| s.id.clone()),
        Some(s3.id.clone())
    );
    assert_eq!(
        report.next_shot.as_ref().map(|s| s.id.clone()),
        Some(s5.id.clone())
    );

    // The best-dialed shot of the five ranks first.
    assert_eq!(report.quality_rank, Some(1));
    assert!(report.is_personal_best);
    assert!(report.analysis.recommendations.is_empty());

    // The sour opener ranks behind everything except the tied bitter
    // shot, which it beats on chronology.
    let worst = analyze_shot_detail(&db, &s1.id, &tuning).await.unwrap();
    assert_eq!(worst.quality_rank, Some(4));
    assert!(!worst.is_personal_best);
    assert!(worst.previous_shot.is_none());
    assert_eq!(
        worst.next_shot.as_ref().map(|s| s.id.clone()),
        Some(s2.id.clone())
    );

    let last = analyze_shot_detail(&db, &s5.id, &tuning).await.unwrap();
    assert_eq!(last.quality_rank, Some(5));
    assert!(last.next_shot.is_none());
    assert!(last
        .analysis
        .recommendations
        .iter()
        .any(|r| r.kind == RecommendationKind::GrindCoarser));
}

#[tokio::test]
async fn ranking_needs_more_than_three_shots() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(&dir);
    let tuning = BrewTuning::default();

    let bean_id = seed_bean(&db, "Fresh Bean", 5).await;
    seed_shot(&db, &bean_id, 26, None).await;
    seed_shot(&db, &bean_id, 27, None).await;
    let third = seed_shot(&db, &bean_id, 28, Some(TastePrimary::Perfect)).await;

    let report = analyze_shot_detail(&db, &third.id, &tuning).await.unwrap();
    assert_eq!(report.quality_rank, None);
    assert!(!report.is_personal_best);
    assert_eq!(report.related_shot_count, 3);

    // A fourth shot crosses the gate.
    let fourth = seed_shot(&db, &bean_id, 28, Some(TastePrimary::Perfect)).await;
    let report = analyze_shot_detail(&db, &fourth.id, &tuning).await.unwrap();
    assert!(report.quality_rank.is_some());
}

#[tokio::test]
async fn missing_shot_is_shot_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(&dir);

    let err = analyze_shot_detail(&db, "no-such-shot", &BrewTuning::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ShotNotFound(_)));
}

#[tokio::test]
async fn dangling_bean_reference_is_its_own_failure_kind() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_database(&dir);
    let tuning = BrewTuning::default();

    let bean_id = seed_bean(&db, "Doomed Bean", 7).await;
    let shot = seed_shot(&db, &bean_id, 27, None).await;
    db.delete_bean(&bean_id).await.unwrap();

    let err = analyze_shot_detail(&db, &shot.id, &tuning).await.unwrap_err();
    match err {
        CoreError::AssociatedBeanMissing {
            shot_id,
            bean_id: missing,
        } => {
            assert_eq!(shot_id, shot.id);
            assert_eq!(missing, bean_id);
        }
        other => panic!("expected AssociatedBeanMissing, got {other:?}"),
    }
}
