use super::*;

#[test]
fn test_terminal_statuses() {
    assert!(!JobStatus::Pending.is_terminal());
    assert!(!JobStatus::Running.is_terminal());
    assert!(JobStatus::Succeeded.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(JobStatus::Cancelled.is_terminal());
}

#[test]
fn test_status_parse() {
    assert_eq!("running".parse::<JobStatus>(), Ok(JobStatus::Running));
    assert_eq!(" Pending ".parse::<JobStatus>(), Ok(JobStatus::Pending));
    let err = "done".parse::<JobStatus>().unwrap_err();
    assert!(err.to_string().contains("done"));
}

#[test]
fn test_status_serde_lowercase() {
    let json = serde_json::to_string(&JobStatus::Succeeded).unwrap();
    assert_eq!(json, "\"succeeded\"");
    let status: JobStatus = serde_json::from_str("\"failed\"").unwrap();
    assert_eq!(status, JobStatus::Failed);
}

#[test]
fn test_status_messages() {
    assert_eq!(JobStatus::Pending.message(), "Job is pending execution");
    assert_eq!(JobStatus::Cancelled.message(), "Job was cancelled");
}

#[test]
fn test_job_info_skips_absent_timestamps() {
    let info = JobInfo {
        job_id: "job-1".into(),
        name: "n".into(),
        native_name: "timer-job-1".into(),
        namespace: "default".into(),
        kind: Some(JobKind::timer()),
        status: JobStatus::Pending,
        created_at: None,
        started_at: None,
        completed_at: None,
        created_by: String::new(),
        labels: BTreeMap::new(),
        annotations: BTreeMap::new(),
        details: Some(JobDetails::Timer(TimerDetails {
            duration_seconds: 30,
            ..Default::default()
        })),
    };
    let value = serde_json::to_value(&info).unwrap();
    assert!(value.get("started_at").is_none());
    assert_eq!(value["status"], "pending");
    assert_eq!(value["details"]["kind"], "timer");
    assert_eq!(value["details"]["duration_seconds"], 30);
}
