//! Schema-level guarantees, checked below the service layer

use chrono::NaiveDate;
use shared::models::{CompanyPayload, EmployeeFilter, EmployeeStatus, Role};

use hr_server::db::{self, DbService};
use hr_server::domain::WriteMode;
use hr_server::domain::validation::{COMPANY_NAME_TAKEN, EmployeeCandidate};
use hr_server::services;
use hr_server::{AppError, CurrentUser, ErrorCode, ServiceError};

async fn open() -> DbService {
    DbService::new("sqlite::memory:", 1).await.unwrap()
}

fn candidate(company_id: i64, department_id: Option<i64>, name: &str) -> EmployeeCandidate {
    EmployeeCandidate {
        company_id,
        department_id,
        status: EmployeeStatus::ApplicationReceived,
        name: name.into(),
        email: "someone@acme.test".into(),
        phone: "+1234567890".into(),
        address: "1 Main Street".into(),
        designation: "Engineer".into(),
        hired_on: None,
    }
}

#[tokio::test]
async fn test_hired_status_and_date_are_tied_by_schema() {
    let db = open().await;
    let company = db::companies::insert(&db.pool, "Acme", 1).await.unwrap();

    let hired_without_date = EmployeeCandidate {
        status: EmployeeStatus::Hired,
        ..candidate(company, None, "No Date")
    };
    assert!(db::employees::insert(&db.pool, &hired_without_date, 1).await.is_err());

    let dated_applicant = EmployeeCandidate {
        hired_on: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..candidate(company, None, "Early Date")
    };
    assert!(db::employees::insert(&db.pool, &dated_applicant, 1).await.is_err());

    let hired = EmployeeCandidate {
        status: EmployeeStatus::Hired,
        hired_on: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..candidate(company, None, "Hired")
    };
    let id = db::employees::insert(&db.pool, &hired, 1).await.unwrap();
    let stored = db::employees::find_by_id(&db.pool, id).await.unwrap().unwrap();
    assert_eq!(stored.status, EmployeeStatus::Hired);
    assert_eq!(stored.hired_on, NaiveDate::from_ymd_opt(2024, 1, 1));
}

#[tokio::test]
async fn test_department_with_employees_cannot_be_deleted() {
    let db = open().await;
    let company = db::companies::insert(&db.pool, "Acme", 1).await.unwrap();
    let dept = db::departments::insert(&db.pool, company, "Eng", 1).await.unwrap();
    db::employees::insert(&db.pool, &candidate(company, Some(dept), "Pinned"), 1)
        .await
        .unwrap();

    assert!(db::departments::delete(&db.pool, dept).await.is_err());
    assert_eq!(db::departments::employee_count(&db.pool, dept).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unique_names() {
    let db = open().await;
    let acme = db::companies::insert(&db.pool, "Acme", 1).await.unwrap();
    let raced = db::companies::insert(&db.pool, "Acme", 1).await.unwrap_err();
    let err = AppError::from(ServiceError::from(raced));
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(err.errors.unwrap().get("name"), Some(COMPANY_NAME_TAKEN));
    assert!(db::companies::name_taken(&db.pool, "Acme", None).await.unwrap());
    assert!(!db::companies::name_taken(&db.pool, "Acme", Some(acme)).await.unwrap());

    db::departments::insert(&db.pool, acme, "Eng", 1).await.unwrap();
    assert!(db::departments::insert(&db.pool, acme, "Eng", 1).await.is_err());
    assert!(db::departments::name_taken(&db.pool, acme, "Eng", None).await.unwrap());
}

#[tokio::test]
async fn test_counts_follow_relationships() {
    let db = open().await;
    let acme = db::companies::insert(&db.pool, "Acme", 1).await.unwrap();
    let eng = db::departments::insert(&db.pool, acme, "Eng", 1).await.unwrap();
    for i in 0..3 {
        db::employees::insert(&db.pool, &candidate(acme, Some(eng), &format!("E{i}")), i)
            .await
            .unwrap();
    }
    db::employees::insert(&db.pool, &candidate(acme, None, "Loose"), 10)
        .await
        .unwrap();

    let summary = db::companies::find_summary(&db.pool, acme).await.unwrap().unwrap();
    assert_eq!(summary.number_of_departments, 1);
    assert_eq!(summary.number_of_employees, 4);

    let view = db::departments::find_view(&db.pool, eng).await.unwrap().unwrap();
    assert_eq!(view.number_of_employees, 3);
    assert_eq!(view.company_name, "Acme");

    let records = db::employees::list_records(&db.pool, &EmployeeFilter::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].employee.name, "Loose");
    assert_eq!(records[0].department_name, None);
    assert_eq!(records[1].department_name.as_deref(), Some("Eng"));

    let stats = db::stats::dashboard_summary(&db.pool).await.unwrap();
    assert_eq!(stats.total_companies, 1);
    assert_eq!(stats.total_departments, 1);
    assert_eq!(stats.total_employees, 4);
    assert_eq!(stats.pending_applications, 4);
    assert_eq!(stats.hired_employees, 0);
}

#[tokio::test]
async fn test_company_rows_cascade() {
    let db = open().await;
    let acme = db::companies::insert(&db.pool, "Acme", 1).await.unwrap();
    let eng = db::departments::insert(&db.pool, acme, "Eng", 1).await.unwrap();
    db::employees::insert(&db.pool, &candidate(acme, Some(eng), "Gone"), 1)
        .await
        .unwrap();

    let mut tx = db.pool.begin().await.unwrap();
    assert_eq!(db::employees::delete_by_company(&mut *tx, acme).await.unwrap(), 1);
    assert_eq!(db::departments::delete_by_company(&mut *tx, acme).await.unwrap(), 1);
    assert_eq!(db::companies::delete(&mut *tx, acme).await.unwrap(), 1);
    tx.commit().await.unwrap();

    let stats = db::stats::dashboard_summary(&db.pool).await.unwrap();
    assert_eq!(stats, Default::default());
}

#[tokio::test]
async fn test_concurrent_writers_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("hr.db").display());
    let db = DbService::new(&url, 4).await.unwrap();
    let acme = db::companies::insert(&db.pool, "Acme", 1).await.unwrap();
    let actor = CurrentUser {
        id: 1,
        username: "admin".into(),
        email: "admin@acme.test".into(),
        role: Role::Admin,
    };

    let mut tasks = Vec::new();
    for i in 0..16 {
        let pool = db.pool.clone();
        let actor = actor.clone();
        tasks.push(tokio::spawn(async move {
            let payload = CompanyPayload {
                name: Some(format!("Acme {i}")),
            };
            services::companies::update(&pool, &actor, acme, &payload, WriteMode::Patch).await
        }));
    }
    for task in tasks {
        let result = task.await.unwrap();
        assert!(result.is_ok(), "{:?}", result.err());
    }

    let company = db::companies::find_by_id(&db.pool, acme).await.unwrap().unwrap();
    assert!(company.name.starts_with("Acme "));
}
