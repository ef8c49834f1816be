use chrono::NaiveDate;
use tackletask_core::{Client, Project, Task, WorkStatus};

#[test]
fn status_serializes_with_display_spelling() {
    assert_eq!(
        serde_json::to_value(WorkStatus::InProgress).unwrap(),
        "In Progress"
    );
    let decoded: WorkStatus = serde_json::from_str("\"Completed\"").unwrap();
    assert_eq!(decoded, WorkStatus::Completed);
    assert!(serde_json::from_str::<WorkStatus>("\"Blocked\"").is_err());
}

#[test]
fn project_serializes_deadline_as_calendar_date() {
    let project = Project {
        id: 1,
        title: "Website".to_string(),
        description: "Landing page".to_string(),
        deadline: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        client_id: 4,
        project_status: WorkStatus::Pending,
    };

    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["deadline"], "2025-01-15");
    assert_eq!(json["project_status"], "Pending");
    assert!(json.get("project_earnings").is_none());

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}

#[test]
fn task_and_client_do_not_carry_derived_fields() {
    let task = Task {
        id: 2,
        name: "Design".to_string(),
        hours_worked: 10.0,
        rate_per_hour: 50.0,
        project_id: 1,
        status: WorkStatus::InProgress,
    };
    let json = serde_json::to_value(&task).unwrap();
    assert!(json.get("earnings").is_none());
    assert_eq!(json["status"], "In Progress");

    let client = Client {
        id: 3,
        name: "Acme".to_string(),
        email: "a@acme.com".to_string(),
        phone: "555-0100".to_string(),
    };
    let json = serde_json::to_value(&client).unwrap();
    assert_eq!(json["email"], "a@acme.com");
}
