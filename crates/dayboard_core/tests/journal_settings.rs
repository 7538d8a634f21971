use chrono::NaiveDate;
use dayboard_core::db::open_db_in_memory;
use dayboard_core::{
    GoalDraft, GoalService, HabitDraft, HabitService, KeyValueStore, NewReflection, PlanGoal,
    ReflectionService, ReminderKind, ServiceError, SettingsService, SkillDraft, SkillService,
    SqliteKeyValueStore, SummaryService, Task, TaskService, TrackingPeriod, WeeklyService,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reflection(date: NaiveDate, content: &str, tags: &[&str]) -> NewReflection {
    NewReflection {
        date,
        content: content.to_string(),
        lessons: String::new(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

#[test]
fn reflections_are_listed_newest_first_and_searchable() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteKeyValueStore::new(&conn));

    service
        .add_reflection(reflection(day(2024, 1, 1), "Started the year calm", &["mood"]))
        .unwrap();
    let second = service
        .add_reflection(reflection(day(2024, 1, 2), "Long walk outside", &["Health"]))
        .unwrap();

    let entries = service.list_reflections().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, second.id);

    let hits = service.search_reflections("health").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "Long walk outside");
    assert_eq!(service.search_reflections("  ").unwrap().len(), 2);

    service.delete_reflection(&second.id).unwrap();
    assert_eq!(service.list_reflections().unwrap().len(), 1);
}

#[test]
fn reflection_requires_content() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteKeyValueStore::new(&conn));

    let err = service
        .add_reflection(reflection(day(2024, 1, 1), " ", &[]))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn notification_settings_default_then_persist_toggles() {
    let conn = open_db_in_memory().unwrap();
    let service = SettingsService::new(SqliteKeyValueStore::new(&conn));

    let defaults = service.notification_settings().unwrap();
    assert_eq!(defaults.len(), 4);
    assert!(!defaults[2].enabled);

    assert!(service.toggle_notification("daily reflection").unwrap());
    let stored = service.notification_settings().unwrap();
    assert!(stored[2].enabled);
    assert!(stored[0].enabled);

    let err = service.toggle_notification("Push").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn reminders_are_validated_toggled_and_deleted() {
    let conn = open_db_in_memory().unwrap();
    let service = SettingsService::new(SqliteKeyValueStore::new(&conn));
    let days = vec!["Monday".to_string(), "Thursday".to_string()];

    let reminder = service
        .add_reminder(ReminderKind::Weekly, " 07:30 ", &days)
        .unwrap();
    assert_eq!(reminder.time, "07:30");
    assert_eq!(reminder.days, vec!["monday", "thursday"]);
    assert!(reminder.enabled);

    assert!(service
        .add_reminder(ReminderKind::Daily, "25:00", &days)
        .is_err());
    assert!(service
        .add_reminder(ReminderKind::Daily, "08:00", &["someday".to_string()])
        .is_err());
    assert_eq!(service.list_reminders().unwrap().len(), 1);

    assert!(!service.toggle_reminder(&reminder.id).unwrap());
    assert!(!service.list_reminders().unwrap()[0].enabled);

    service.delete_reminder(&reminder.id).unwrap();
    assert!(service.list_reminders().unwrap().is_empty());
}

#[test]
fn skills_progress_is_clamped() {
    let conn = open_db_in_memory().unwrap();
    let service = SkillService::new(SqliteKeyValueStore::new(&conn));

    let skill = service
        .add_skill(SkillDraft {
            name: "Rust".to_string(),
            category: "programming".to_string(),
            ..SkillDraft::default()
        })
        .unwrap();
    assert_eq!(skill.current_level, 1);
    assert_eq!(skill.target_level, 10);

    assert_eq!(service.update_progress(&skill.id, 140.0).unwrap().progress, 100.0);
    assert_eq!(service.update_progress(&skill.id, 45.5).unwrap().progress, 45.5);

    let edited = service
        .edit_skill(
            &skill.id,
            SkillDraft {
                name: "Rust".to_string(),
                category: "systems".to_string(),
                current_level: 4,
                target_level: 8,
            },
        )
        .unwrap();
    assert_eq!(edited.progress, 45.5);
    assert_eq!(edited.current_level, 4);

    service.delete_skill(&skill.id).unwrap();
    assert!(service.list_skills().unwrap().is_empty());
}

#[test]
fn weekly_documents_default_to_blank_and_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let service = WeeklyService::new(SqliteKeyValueStore::new(&conn));
    let wednesday = day(2024, 6, 5);

    let mut review = service.review_for(wednesday).unwrap();
    let mut plan = service.plan_for(wednesday).unwrap();
    assert_eq!(review.week_starting, day(2024, 6, 3));
    assert_eq!(plan.key_tasks.len(), 5);

    review.accomplishments = "Shipped the release".to_string();
    plan.top_goals[0] = PlanGoal {
        text: "Finish chapter".to_string(),
        progress: 40.0,
    };
    service.save_week(wednesday, &review, &plan).unwrap();

    let sunday = day(2024, 6, 9);
    assert_eq!(service.review_for(sunday).unwrap(), review);
    assert_eq!(service.plan_for(sunday).unwrap(), plan);
    assert!(service
        .review_for(day(2024, 6, 10))
        .unwrap()
        .accomplishments
        .is_empty());
}

#[test]
fn weekly_plan_rejects_progress_over_hundred() {
    let conn = open_db_in_memory().unwrap();
    let service = WeeklyService::new(SqliteKeyValueStore::new(&conn));
    let date = day(2024, 6, 3);

    let review = service.review_for(date).unwrap();
    let mut plan = service.plan_for(date).unwrap();
    plan.top_goals[1].progress = 120.0;

    assert!(service.save_week(date, &review, &plan).is_err());
}

#[test]
fn weekly_edits_stay_under_the_monday_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .put_raw(
            "weekly-review-2024-01-08",
            r#"{"weekStarting":"2024-01-10","accomplishments":"old"}"#,
        )
        .unwrap();
    let service = WeeklyService::new(&store);
    let date = day(2024, 1, 11);

    let mut review = service.review_for(date).unwrap();
    assert_eq!(review.week_starting, day(2024, 1, 10));
    review.accomplishments = "new".to_string();
    service.save_review(date, &review).unwrap();

    assert_eq!(service.review_for(date).unwrap().accomplishments, "new");
    assert_eq!(
        store.list_keys("weekly-").unwrap(),
        vec!["weekly-review-2024-01-08".to_string()]
    );
}

#[test]
fn saving_a_review_leaves_the_plan_unwritten() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let service = WeeklyService::new(&store);
    let date = day(2024, 6, 5);

    let mut review = service.review_for(date).unwrap();
    review.gratitude = "Long walks".to_string();
    service.save_review(date, &review).unwrap();
    assert_eq!(
        store.list_keys("weekly-").unwrap(),
        vec!["weekly-review-2024-06-03".to_string()]
    );

    let mut plan = service.plan_for(date).unwrap();
    plan.personal_development = "Read two chapters".to_string();
    service.save_plan(date, &plan).unwrap();
    assert_eq!(
        store.list_keys("weekly-").unwrap(),
        vec![
            "weekly-plan-2024-06-03".to_string(),
            "weekly-review-2024-06-03".to_string(),
        ]
    );
}

#[test]
fn summary_counts_every_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let today = day(2024, 3, 10);

    let goals = GoalService::new(&store);
    let goal = goals
        .add_goal(GoalDraft {
            title: "Save".to_string(),
            description: String::new(),
            category: "finance".to_string(),
            target: 200.0,
            current: 0.0,
            deadline: day(2024, 12, 1),
        })
        .unwrap();
    goals.update_progress(&goal.id, 100.0).unwrap();

    let habits = HabitService::new(&store);
    let habit = habits
        .add_habit(HabitDraft {
            name: "Read".to_string(),
            description: String::new(),
            category: String::new(),
            frequency: 2,
            tracking_period: TrackingPeriod::Daily,
        })
        .unwrap();
    for date in [day(2024, 3, 8), day(2024, 3, 9)] {
        habits.toggle_completion(&habit.id, date, date).unwrap();
    }

    let tasks = TaskService::new(&store);
    tasks.add_task(Task::new("Late", day(2024, 3, 1))).unwrap();
    tasks.add_task(Task::new("Soon", day(2024, 3, 12))).unwrap();
    let done = tasks.add_task(Task::new("Done", day(2024, 3, 2))).unwrap();
    tasks.set_completed(&done.id, true).unwrap();

    ReflectionService::new(&store)
        .add_reflection(reflection(today, "Good day", &[]))
        .unwrap();

    let summary = SummaryService::new(&store).summary(today).unwrap();
    assert_eq!(summary.goals_total, 1);
    assert_eq!(summary.goals_average_percent, 50.0);
    assert_eq!(summary.habits_total, 1);
    assert_eq!(summary.best_streak, 2);
    assert_eq!(summary.tasks_total, 3);
    assert_eq!(summary.tasks_done, 1);
    assert_eq!(summary.tasks_overdue, 1);
    assert_eq!(summary.reflections_total, 1);
}
