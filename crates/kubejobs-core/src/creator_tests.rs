use super::*;
use crate::ErrorKind;
use kubejobs_cluster::InMemoryCluster;
use kubejobs_kind_timer::TimerHandler;
use kubejobs_protocols::manifest::{LABEL_MANAGED_BY, MANAGER_NAME};
use kubejobs_protocols::TimerConfig;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

const TIMEOUT: Duration = Duration::from_secs(5);

fn registry() -> Arc<KindRegistry> {
    let registry = KindRegistry::new();
    registry
        .register(JobKind::timer(), Arc::new(TimerHandler::new()))
        .unwrap();
    Arc::new(registry)
}

fn setup() -> (Arc<InMemoryCluster>, JobCreator) {
    let cluster = Arc::new(InMemoryCluster::new());
    let creator = JobCreator::new(cluster.clone(), registry(), JobDefaults::default(), TIMEOUT);
    (cluster, creator)
}

fn timer_request() -> ScheduleRequest {
    ScheduleRequest::new("t1", TimerConfig::new(30, "t1", "http://cp:50053"))
}

#[tokio::test]
async fn test_schedule_then_status() {
    let (_cluster, creator) = setup();
    let scheduled = creator.schedule(timer_request()).await.unwrap();

    assert!(!scheduled.job_id.is_empty());
    assert_eq!(scheduled.status, JobStatus::Pending);
    assert_eq!(scheduled.namespace, "default");
    assert_eq!(scheduled.native_name, format!("timer-{}", scheduled.job_id));

    let info = creator.get_status(&scheduled.job_id, None).await.unwrap();
    assert_eq!(info.job_id, scheduled.job_id);
    assert!(matches!(info.status, JobStatus::Pending | JobStatus::Running));
}

#[tokio::test]
async fn test_schedule_uses_caller_job_id() {
    let (cluster, creator) = setup();
    let request = timer_request().with_job_id("nightly-42").with_namespace("batch");
    let scheduled = creator.schedule(request).await.unwrap();

    assert_eq!(scheduled.job_id, "nightly-42");
    assert_eq!(scheduled.native_name, "timer-nightly-42");
    assert!(cluster.contains("batch", "timer-nightly-42"));
}

#[tokio::test]
async fn test_schedule_missing_config() {
    let (cluster, creator) = setup();
    let request = ScheduleRequest {
        name: "x".to_string(),
        ..Default::default()
    };
    let err = creator.schedule(request).await.unwrap_err();
    assert!(matches!(err, JobError::MissingConfig));
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert!(cluster.is_empty());
}

#[tokio::test]
async fn test_schedule_invalid_config_skips_cluster() {
    let (cluster, creator) = setup();
    cluster.set_failing(true);
    let request = ScheduleRequest::new("t1", TimerConfig::new(0, "t1", "http://cp"));
    let err = creator.schedule(request).await.unwrap_err();
    assert!(matches!(err, JobError::Kind(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);

    cluster.set_failing(false);
    assert!(cluster.is_empty());
}

#[tokio::test]
async fn test_schedule_unregistered_kind() {
    let cluster = Arc::new(InMemoryCluster::new());
    let creator = JobCreator::new(
        cluster.clone(),
        Arc::new(KindRegistry::new()),
        JobDefaults::default(),
        TIMEOUT,
    );
    let err = creator.schedule(timer_request()).await.unwrap_err();
    assert!(matches!(err, JobError::UnknownKind(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[tokio::test]
async fn test_schedule_blank_job_id() {
    let (cluster, creator) = setup();
    let err = creator
        .schedule(timer_request().with_job_id("  "))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(cluster.is_empty());
}

#[tokio::test]
async fn test_schedule_rejects_mixed_case_job_id() {
    let (cluster, creator) = setup();
    let err = creator
        .schedule(timer_request().with_job_id("Alpha"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("\"alpha\""));
    assert!(cluster.is_empty());

    let scheduled = creator
        .schedule(timer_request().with_job_id("alpha"))
        .await
        .unwrap();
    assert_eq!(scheduled.native_name, "timer-alpha");
    assert_eq!(cluster.len(), 1);
}

#[tokio::test]
async fn test_schedule_rejects_non_label_job_ids() {
    let (cluster, creator) = setup();
    cluster.set_failing(true);
    let too_long = "a".repeat(64);
    for id in ["a_b", "a.b", "-a", "a-", "x,team=y", too_long.as_str()] {
        let err = creator
            .schedule(timer_request().with_job_id(id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{id}");
    }
}

#[tokio::test]
async fn test_schedule_submit_failure_is_internal() {
    let (cluster, creator) = setup();
    cluster.set_failing(true);
    let err = creator.schedule(timer_request()).await.unwrap_err();
    assert!(matches!(err, JobError::Cluster { operation: "create", .. }));
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_schedule_name_collision_is_internal() {
    let (_cluster, creator) = setup();
    creator
        .schedule(timer_request().with_job_id("dup"))
        .await
        .unwrap();
    let err = creator
        .schedule(timer_request().with_job_id("dup"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test(start_paused = true)]
async fn test_cluster_timeout_is_internal() {
    let cluster = Arc::new(InMemoryCluster::new().with_latency(Duration::from_secs(60)));
    let creator = JobCreator::new(cluster.clone(), registry(), JobDefaults::default(), TIMEOUT);

    let err = creator.schedule(timer_request()).await.unwrap_err();
    assert!(matches!(err, JobError::Timeout { operation: "create", .. }));
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(cluster.is_empty());
}

#[tokio::test]
async fn test_get_status_requires_job_id() {
    let (_cluster, creator) = setup();
    let err = creator.get_status("", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_get_status_not_found() {
    let (_cluster, creator) = setup();
    let err = creator.get_status("job-missing", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_get_status_respects_namespace() {
    let (_cluster, creator) = setup();
    creator
        .schedule(timer_request().with_job_id("ns-job").with_namespace("batch"))
        .await
        .unwrap();

    assert!(creator.get_status("ns-job", None).await.is_err());
    let info = creator.get_status("ns-job", Some("batch")).await.unwrap();
    assert_eq!(info.namespace, "batch");
}

#[tokio::test]
async fn test_get_status_job_info() {
    let (cluster, creator) = setup();
    let request = timer_request()
        .with_job_id("info-1")
        .with_label("team", "infra")
        .with_annotation("note", "hello")
        .with_created_by("alice");
    creator.schedule(request).await.unwrap();
    cluster.mark_running("default", "timer-info-1").unwrap();

    let info = creator.get_status("info-1", None).await.unwrap();
    assert_eq!(info.status, JobStatus::Running);
    assert_eq!(info.name, "t1");
    assert_eq!(info.native_name, "timer-info-1");
    assert_eq!(info.kind, Some(JobKind::timer()));
    assert_eq!(info.created_by, "alice");
    assert!(info.created_at.is_some());
    assert!(info.started_at.is_some());
    assert!(info.completed_at.is_none());
    assert_eq!(info.labels.len(), 1);
    assert_eq!(info.labels.get("team").unwrap(), "infra");
    assert_eq!(info.annotations.len(), 1);

    let Some(JobDetails::Timer(details)) = info.details else {
        panic!("expected timer details");
    };
    assert_eq!(details.duration_seconds, 30);
    assert_eq!(details.report_endpoint, "http://cp:50053");
}

#[tokio::test]
async fn test_get_status_duplicate_id_uses_first() {
    let (cluster, creator) = setup();
    let handler = TimerHandler::new();
    let request = timer_request().with_job_id("shared");
    for name in ["timer-shared-a", "timer-shared-b"] {
        let mut job = render(&handler, &request, &JobDefaults::default()).unwrap();
        job.metadata.name = Some(name.to_string());
        cluster.create_job(&job).await.unwrap();
    }
    cluster.mark_failed("default", "timer-shared-b").unwrap();

    let info = creator.get_status("shared", None).await.unwrap();
    assert_eq!(info.native_name, "timer-shared-a");
    assert_eq!(info.status, JobStatus::Pending);
}

#[tokio::test]
async fn test_cancel_pending_job() {
    let (cluster, creator) = setup();
    let scheduled = creator.schedule(timer_request()).await.unwrap();

    let info = creator.cancel(&scheduled.job_id, None).await.unwrap();
    assert_eq!(info.status, JobStatus::Cancelled);
    assert!(cluster.is_empty());

    let err = creator.get_status(&scheduled.job_id, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_cancel_running_job() {
    let (cluster, creator) = setup();
    let scheduled = creator
        .schedule(timer_request().with_job_id("busy"))
        .await
        .unwrap();
    cluster.mark_running("default", &scheduled.native_name).unwrap();
    assert_eq!(
        creator.get_status("busy", None).await.unwrap().status,
        JobStatus::Running
    );

    let info = creator.cancel("busy", None).await.unwrap();
    assert_eq!(info.status, JobStatus::Cancelled);
    assert_eq!(info.native_name, scheduled.native_name);
    assert!(!cluster.contains("default", &scheduled.native_name));
}

#[tokio::test]
async fn test_cancel_succeeded_job_fails() {
    let (cluster, creator) = setup();
    let scheduled = creator.schedule(timer_request()).await.unwrap();
    cluster
        .mark_succeeded("default", &scheduled.native_name)
        .unwrap();

    let err = creator.cancel(&scheduled.job_id, None).await.unwrap_err();
    assert!(matches!(
        err,
        JobError::TerminalState {
            status: JobStatus::Succeeded,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Internal);

    let info = creator.get_status(&scheduled.job_id, None).await.unwrap();
    assert_eq!(info.status, JobStatus::Succeeded);
    assert_eq!(cluster.len(), 1);
}

#[tokio::test]
async fn test_cancel_failed_job_fails() {
    let (cluster, creator) = setup();
    let scheduled = creator.schedule(timer_request()).await.unwrap();
    cluster.mark_failed("default", &scheduled.native_name).unwrap();

    let err = creator.cancel(&scheduled.job_id, None).await.unwrap_err();
    assert!(err.to_string().contains("already failed"));
}

#[tokio::test]
async fn test_cancel_unknown_job() {
    let (_cluster, creator) = setup();
    let err = creator.cancel("nope", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_get_status_rejects_selector_syntax() {
    let (cluster, creator) = setup();
    cluster.set_failing(true);
    for id in ["a,b", "x=y", "a!b"] {
        let err = creator.get_status(id, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{id}");
        let err = creator.cancel(id, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{id}");
    }
}

#[tokio::test]
async fn test_list_rejects_invalid_label_filters() {
    let (cluster, creator) = setup();
    cluster.set_failing(true);
    let filters = [("a,b", "x"), ("team", "x=y"), ("team", "a,managed=no")];
    for (key, value) in filters {
        let query = ListQuery {
            labels: BTreeMap::from([(key.to_string(), value.to_string())]),
            ..ListQuery::default()
        };
        let err = creator.list(query).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{key}={value}");
    }
}

#[tokio::test]
async fn test_list_status_filter() {
    let (cluster, creator) = setup();
    let ids = ["pending", "running", "succeeded", "failed"];
    for id in ids {
        creator
            .schedule(timer_request().with_job_id(id))
            .await
            .unwrap();
    }
    cluster.mark_running("default", "timer-running").unwrap();
    cluster.mark_succeeded("default", "timer-succeeded").unwrap();
    cluster.mark_failed("default", "timer-failed").unwrap();

    let all = creator.list(ListQuery::default()).await.unwrap();
    assert_eq!(all.total_count, 4);

    let running = creator
        .list(ListQuery {
            statuses: vec![JobStatus::Running],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(running.total_count, 1);
    assert_eq!(running.jobs[0].job_id, "running");

    let finished = creator
        .list(ListQuery {
            statuses: vec![JobStatus::Succeeded, JobStatus::Failed],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(finished.total_count, 2);
}

#[tokio::test]
async fn test_list_label_filter() {
    let (_cluster, creator) = setup();
    creator
        .schedule(timer_request().with_job_id("a").with_label("team", "x"))
        .await
        .unwrap();
    creator
        .schedule(timer_request().with_job_id("b").with_label("team", "y"))
        .await
        .unwrap();

    let list = creator
        .list(ListQuery {
            labels: BTreeMap::from([("team".to_string(), "x".to_string())]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(list.total_count, 1);
    assert_eq!(list.jobs[0].job_id, "a");
}

#[tokio::test]
async fn test_list_skips_unreadable_objects() {
    let (cluster, creator) = setup();
    creator
        .schedule(timer_request().with_job_id("good"))
        .await
        .unwrap();

    let stray = Job {
        metadata: ObjectMeta {
            name: Some("stray".to_string()),
            namespace: Some("default".to_string()),
            labels: Some(BTreeMap::from([(
                LABEL_MANAGED_BY.to_string(),
                MANAGER_NAME.to_string(),
            )])),
            ..Default::default()
        },
        ..Default::default()
    };
    cluster.create_job(&stray).await.unwrap();

    let list = creator.list(ListQuery::default()).await.unwrap();
    assert_eq!(list.total_count, 1);
    assert_eq!(list.jobs[0].job_id, "good");
}

#[tokio::test]
async fn test_list_failure_is_internal() {
    let (cluster, creator) = setup();
    cluster.set_failing(true);
    let err = creator.list(ListQuery::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_details_absent_for_unregistered_kind() {
    let (cluster, creator) = setup();
    creator
        .schedule(timer_request().with_job_id("orphan"))
        .await
        .unwrap();
    creator.registry().unregister(&JobKind::timer()).unwrap();

    let info = creator.get_status("orphan", None).await.unwrap();
    assert!(info.details.is_none());
    assert_eq!(info.kind, Some(JobKind::timer()));
    assert_eq!(cluster.len(), 1);
}
