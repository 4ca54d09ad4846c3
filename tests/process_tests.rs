// Runner behavior tests. These spawn /bin/sh, so they run anywhere without
// a Homebrew installation.

use futures::StreamExt;
use spigot::process::{OutputEvent, shell};
use spigot::progress::{LINE_INCREMENT, ProgressTracker, UpdateStage};
use spigot::{SpigotError, Store};

#[tokio::test]
async fn stdout_and_stderr_interleave_as_events() {
    let mut stream = shell(
        "/bin/sh",
        ["-c", "echo out1; echo err1 1>&2; echo out2"],
    )
    .unwrap();

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    while let Some(event) = stream.next().await {
        match event {
            OutputEvent::Stdout(line) => stdout.push(line),
            OutputEvent::Stderr(line) => stderr.push(line),
        }
    }
    stream.finish().await.unwrap();

    assert_eq!(stdout, vec!["out1", "out2"]);
    assert_eq!(stderr, vec!["err1"]);
}

#[tokio::test]
async fn the_sequence_is_finite() {
    let mut stream = shell("/bin/sh", ["-c", "echo only"]).unwrap();
    assert!(stream.next().await.is_some());
    assert!(stream.next().await.is_none());
    // Exhausted stays exhausted.
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn many_lines_flow_through_the_bounded_buffer() {
    // Far more lines than the channel holds; the producer must block and
    // resume rather than drop output.
    let mut stream = shell("/bin/sh", ["-c", "i=0; while [ $i -lt 2000 ]; do echo $i; i=$((i+1)); done"])
        .unwrap();

    let mut count = 0u32;
    while let Some(event) = stream.next().await {
        assert!(!event.is_stderr());
        count += 1;
    }
    stream.finish().await.unwrap();
    assert_eq!(count, 2000);
}

#[tokio::test]
async fn missing_executable_is_a_launch_failure() {
    match shell("/no/such/tool", Vec::<String>::new()) {
        Err(SpigotError::LaunchFailed { program, .. }) => {
            assert_eq!(program.to_str(), Some("/no/such/tool"));
        }
        other => panic!("expected LaunchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn non_zero_exit_never_reads_as_success() {
    let stream = shell("/bin/sh", ["-c", "echo fine; exit 1"]).unwrap();
    let err = stream.collect_output().await.unwrap_err();
    match err {
        SpigotError::NonZeroExit { code, .. } => assert_eq!(code, Some(1)),
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
}

#[tokio::test]
async fn collected_output_preserves_line_order() {
    let stream = shell("/bin/sh", ["-c", "echo a; echo b; echo c"]).unwrap();
    let output = stream.collect_output().await.unwrap();
    assert_eq!(output.stdout, "a\nb\nc\n");
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn tracker_driven_by_a_real_stream() {
    // Three stdout lines → three increments; the stderr line lands in the
    // error list without advancing progress.
    let mut stream = shell(
        "/bin/sh",
        ["-c", "echo one; echo two; echo three; echo bad 1>&2"],
    )
    .unwrap();

    let mut tracker = ProgressTracker::new();
    tracker.start(UpdateStage::Upgrading);
    while let Some(event) = stream.next().await {
        tracker.record(&event);
    }
    stream.finish().await.unwrap();

    assert!((tracker.value() - 3.0 * LINE_INCREMENT).abs() < f64::EPSILON);
    assert_eq!(tracker.errors().len(), 1);
    assert!(tracker.errors()[0].contains("bad"));

    tracker.finish();
    assert_eq!(tracker.stage(), UpdateStage::Idle);
}

#[tokio::test]
async fn store_updates_from_consumer_loop_reach_subscribers() {
    let lines = Store::new(Vec::<String>::new());
    let mut sub = lines.subscribe();

    let mut stream = shell("/bin/sh", ["-c", "echo alpha; echo beta"]).unwrap();
    while let Some(event) = stream.next().await {
        lines.update(|all| all.push(event.line().to_string()));
    }
    stream.finish().await.unwrap();

    assert_eq!(sub.next_change().await.unwrap(), vec!["alpha", "beta"]);
}
