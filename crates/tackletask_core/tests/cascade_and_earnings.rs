use chrono::NaiveDate;
use tackletask_core::db::open_db_in_memory;
use tackletask_core::{
    CascadeSummary, EntityKind, NewClient, NewProject, NewTask, RepoError, SqliteTrackerService,
    TaskPatch,
};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn acme_website_design_scenario() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();

    let client = service
        .add_client(&NewClient::new("Acme", "a@acme.com", "555-0100"))
        .unwrap();
    let project = service
        .add_project(&NewProject::new("Website", "", date("2025-01-15"), client.id))
        .unwrap();
    let task = service
        .add_task(&NewTask::new("Design", 10.0, 50.0, project.id))
        .unwrap();

    assert_eq!(task.earnings(), 500.0);
    assert_eq!(service.project_earnings(project.id).unwrap(), 500.0);

    let summary = service.delete_client(client.id).unwrap();
    assert_eq!(
        summary,
        CascadeSummary {
            projects_removed: 1,
            tasks_removed: 1
        }
    );

    assert!(service.client(client.id).unwrap().is_none());
    assert!(service.project(project.id).unwrap().is_none());
    assert!(service.task(task.id).unwrap().is_none());
}

#[test]
fn deleting_client_leaves_other_clients_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();

    let acme = service
        .add_client(&NewClient::new("Acme", "a@acme.com", ""))
        .unwrap();
    let globex = service
        .add_client(&NewClient::new("Globex", "g@globex.com", ""))
        .unwrap();

    for title in ["Website", "App"] {
        let project = service
            .add_project(&NewProject::new(title, "", date("2025-01-15"), acme.id))
            .unwrap();
        service
            .add_task(&NewTask::new("Work", 1.0, 10.0, project.id))
            .unwrap();
        service
            .add_task(&NewTask::new("More work", 2.0, 10.0, project.id))
            .unwrap();
    }
    let kept = service
        .add_project(&NewProject::new("Audit", "", date("2025-01-15"), globex.id))
        .unwrap();
    let kept_task = service
        .add_task(&NewTask::new("Review", 3.0, 10.0, kept.id))
        .unwrap();

    let summary = service.delete_client(acme.id).unwrap();
    assert_eq!(summary.projects_removed, 2);
    assert_eq!(summary.tasks_removed, 4);

    assert_eq!(service.counts().unwrap(), (1, 1, 1));
    assert!(service.projects_of_client(acme.id).unwrap().is_empty());
    assert_eq!(service.project(kept.id).unwrap(), Some(kept));
    assert_eq!(service.task(kept_task.id).unwrap(), Some(kept_task));
}

#[test]
fn deleting_project_removes_only_its_tasks() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();

    let client = service
        .add_client(&NewClient::new("Acme", "a@acme.com", ""))
        .unwrap();
    let website = service
        .add_project(&NewProject::new("Website", "", date("2025-01-15"), client.id))
        .unwrap();
    let app = service
        .add_project(&NewProject::new("App", "", date("2025-02-01"), client.id))
        .unwrap();
    let design = service
        .add_task(&NewTask::new("Design", 10.0, 50.0, website.id))
        .unwrap();
    let build = service
        .add_task(&NewTask::new("Build", 5.0, 60.0, app.id))
        .unwrap();

    let summary = service.delete_project(website.id).unwrap();
    assert_eq!(summary.tasks_removed, 1);

    assert!(service.task(design.id).unwrap().is_none());
    assert_eq!(service.task(build.id).unwrap(), Some(build));
    assert!(service.client(client.id).unwrap().is_some());
}

#[test]
fn deleting_missing_client_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();
    service
        .add_client(&NewClient::new("Acme", "a@acme.com", ""))
        .unwrap();

    let err = service.delete_client(999).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Client,
            id: 999
        }
    ));
    assert_eq!(service.counts().unwrap(), (1, 0, 0));
}

#[test]
fn project_earnings_track_task_updates() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();

    let client = service
        .add_client(&NewClient::new("Acme", "a@acme.com", ""))
        .unwrap();
    let project = service
        .add_project(&NewProject::new("Website", "", date("2025-01-15"), client.id))
        .unwrap();
    assert_eq!(service.project_earnings(project.id).unwrap(), 0.0);

    let task = service
        .add_task(&NewTask::new("Design", 10.0, 50.0, project.id))
        .unwrap();
    service
        .add_task(&NewTask::new("Copy", 0.0, 70.0, project.id))
        .unwrap();
    assert_eq!(service.project_earnings(project.id).unwrap(), 500.0);

    service
        .update_task(
            task.id,
            &TaskPatch {
                rate_per_hour: Some(60.0),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(service.project_earnings(project.id).unwrap(), 600.0);

    service.delete_task(task.id).unwrap();
    assert_eq!(service.project_earnings(project.id).unwrap(), 0.0);
}

#[test]
fn project_earnings_for_missing_project_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();

    assert!(service.project_earnings(12).unwrap_err().is_not_found());
}

#[test]
fn total_earnings_across_projects() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::open(&conn).unwrap();
    assert_eq!(service.total_earnings().unwrap(), 0.0);

    let client = service
        .add_client(&NewClient::new("Acme", "a@acme.com", ""))
        .unwrap();
    let website = service
        .add_project(&NewProject::new("Website", "", date("2025-01-15"), client.id))
        .unwrap();
    let app = service
        .add_project(&NewProject::new("App", "", date("2025-02-01"), client.id))
        .unwrap();
    let idle = service
        .add_project(&NewProject::new("Idle", "", date("2025-03-01"), client.id))
        .unwrap();
    service
        .add_task(&NewTask::new("Design", 10.0, 50.0, website.id))
        .unwrap();
    service
        .add_task(&NewTask::new("Build", 5.0, 60.0, app.id))
        .unwrap();

    let rows = service.earnings_summary().unwrap();
    let per_project: Vec<_> = rows
        .iter()
        .map(|row| (row.project.id, row.task_count, row.earnings))
        .collect();
    assert_eq!(
        per_project,
        [(website.id, 1, 500.0), (app.id, 1, 300.0), (idle.id, 0, 0.0)]
    );
    assert_eq!(service.total_earnings().unwrap(), 800.0);
}
