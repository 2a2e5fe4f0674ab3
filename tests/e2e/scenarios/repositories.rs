use crate::harness::{added, modified, Scenario};
use tasklog_core::ChangeType;

#[test]
fn test_histories_from_all_repositories_are_merged() {
    Scenario::new("multi_repository")
        .repository("foo-api")
        .repository("foo-web")
        .commit("foo-api", "Task 1 endpoint", &[added("src/routes.rs")])
        .commit("foo-web", "Task 1 screen", &[added("src/page.html")])
        .tasks(&["1"])
        .assert_query_count(2)
        .assert_task_row(
            "1",
            ChangeType::Added,
            &[("foo-api/src/routes.rs", 1), ("foo-web/src/page.html", 1)],
        )
        .run()
        .unwrap();
}

#[test]
fn test_same_path_in_two_repositories_stays_separate() {
    Scenario::new("same_path_two_repositories")
        .repository("alpha")
        .repository("beta")
        .commit("alpha", "Task 1 edit", &[modified("README.md")])
        .commit("beta", "Task 2 edit", &[modified("README.md")])
        .tasks(&["1", "2"])
        .assert_row_count(2)
        .assert_task_row("1", ChangeType::Modified, &[("alpha/README.md", 1)])
        .assert_task_row("2", ChangeType::Modified, &[("beta/README.md", 1)])
        .run()
        .unwrap();
}

#[test]
fn test_query_shape() {
    Scenario::new("query_shape")
        .repository("foo")
        .tasks(&["1001", "1002"])
        .author("jon")
        .assert_command_contains("--remotes")
        .assert_command_contains("--author=jon")
        .assert_command_contains("--grep=1001 --grep=1002")
        .assert_command_contains("--name-status")
        .run()
        .unwrap();
}

#[test]
fn test_local_branches_flag() {
    Scenario::new("local_branches")
        .repository("foo")
        .tasks(&["1"])
        .local_branches()
        .assert_command_contains("--branches")
        .run()
        .unwrap();
}

#[test]
fn test_single_job_runs_every_query() {
    Scenario::new("single_job")
        .repository("a")
        .repository("b")
        .repository("c")
        .commit("a", "Task 1 x", &[modified("x")])
        .commit("b", "Task 1 y", &[modified("y")])
        .commit("c", "Task 1 z", &[modified("z")])
        .tasks(&["1"])
        .jobs(1)
        .assert_query_count(3)
        .assert_task_row(
            "1",
            ChangeType::Modified,
            &[("a/x", 1), ("b/y", 1), ("c/z", 1)],
        )
        .run()
        .unwrap();
}
