use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spendlog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendlog").unwrap();
    cmd.arg("--data-dir").arg(dir.path()).env("HOME", dir.path());
    cmd
}

fn add(dir: &TempDir, desc: &str, amount: &str, category: &str, date: &str) {
    spendlog(dir)
        .args(["add", desc, amount, "--category", category, "--date", date])
        .assert()
        .success();
}

#[test]
fn add_then_list_shows_record() {
    let dir = TempDir::new().unwrap();
    spendlog(&dir)
        .args(["add", "Lunch   at cafeteria", "12.50", "--category", "Food", "--date", "2025-09-29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added rec_0001: Lunch at cafeteria"));

    spendlog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch at cafeteria"))
        .stdout(predicate::str::contains("Rendered 1 record(s)."));
}

#[test]
fn invalid_fields_are_reported_and_not_saved() {
    let dir = TempDir::new().unwrap();
    spendlog(&dir)
        .args(["add", "coffee coffee", "01", "--category", "Food2", "--date", "2025-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("description: Duplicate word detected"))
        .stderr(predicate::str::contains("amount:"))
        .stderr(predicate::str::contains("category:"))
        .stderr(predicate::str::contains("date:"));

    spendlog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records."));
}

#[test]
fn html_list_highlights_and_escapes() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Coffee <run>", "3.50", "Food", "2025-09-29");
    add(&dir, "Novel", "12", "Books", "2025-09-28");

    spendlog(&dir)
        .args(["list", "--html", "--search", "coffee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<mark>Coffee</mark> &lt;run&gt;"))
        .stdout(predicate::str::contains("Novel").not());
}

#[test]
fn invalid_search_pattern_disables_filter() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Bus ticket", "1", "Transport", "2025-09-29");
    add(&dir, "Novel", "12", "Books", "2025-09-28");

    spendlog(&dir)
        .args(["list", "--search", "(unclosed"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid regex pattern"))
        .stdout(predicate::str::contains("Rendered 2 record(s)."));
}

#[test]
fn list_sorts_by_amount() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Fifty", "50", "Food", "2025-09-01");
    add(&dir, "Five", "5", "Food", "2025-09-02");
    add(&dir, "Zero", "0", "Food", "2025-09-03");

    let out = spendlog(&dir)
        .args(["list", "--html", "--sort", "amt_asc"])
        .output()
        .unwrap();
    let text = String::from_utf8(out.stdout).unwrap();
    let zero = text.find("Zero").unwrap();
    let five = text.find("Five").unwrap();
    let fifty = text.find("Fifty").unwrap();
    assert!(zero < five && five < fifty, "{text}");
}

#[test]
fn edit_and_delete_unknown_ids_are_no_ops() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Snack", "2", "Food", "2025-09-29");

    spendlog(&dir)
        .args(["edit", "rec_0042", "--amount", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change: rec_0042 not found."));
    spendlog(&dir)
        .args(["delete", "rec_0042"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change"));

    spendlog(&dir)
        .args(["edit", "rec_0001", "--category", "Take-out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Take-out"));
    spendlog(&dir)
        .args(["delete", "rec_0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted rec_0001"));
}

#[test]
fn failed_import_leaves_records_untouched() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Keep me", "7", "Food", "2025-09-29");

    let payload = dir.path().join("bad.json");
    std::fs::write(
        &payload,
        r#"[
  {"id": "rec_0001", "description": "Ok", "amount": 1, "category": "Food", "date": "2025-09-01",
   "createdAt": "2025-09-01T00:00:00.000Z", "updatedAt": "2025-09-01T00:00:00.000Z"},
  {"id": "rec_0002", "description": "No date", "amount": 2, "category": "Food",
   "createdAt": "2025-09-01T00:00:00.000Z", "updatedAt": "2025-09-01T00:00:00.000Z"}
]"#,
    )
    .unwrap();

    spendlog(&dir)
        .arg("import")
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record #2 missing key: date"));

    spendlog(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep me"))
        .stdout(predicate::str::contains("No date").not());
}

#[test]
fn seed_round_trips_through_import_and_export() {
    let dir = TempDir::new().unwrap();
    let seed = dir.path().join("seed.json");
    spendlog(&dir)
        .arg("seed")
        .arg("--output")
        .arg(&seed)
        .assert()
        .success();

    spendlog(&dir)
        .arg("import")
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 records."));

    spendlog(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"Lunch at cafeteria\""));
}

#[test]
fn settings_cap_and_dashboard() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Rent", "120", "Housing", "2025-09-01");

    spendlog(&dir)
        .args(["settings", "cap", "1.234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cap must be a valid number."));
    spendlog(&dir)
        .args(["settings", "cap", "100"])
        .assert()
        .success();

    spendlog(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("RWF 120.00"))
        .stdout(predicate::str::contains("Over by"));

    spendlog(&dir)
        .args(["settings", "cap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cap removed."));
}

#[test]
fn settings_validation() {
    let dir = TempDir::new().unwrap();
    spendlog(&dir)
        .args(["settings", "rates", "--usd", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid USD rate format."));
    spendlog(&dir)
        .args(["settings", "categories", "Food, Gifts2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category: \"Gifts2\""));
    spendlog(&dir)
        .args(["settings", "theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));
    spendlog(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn setting_one_rate_keeps_the_other() {
    let dir = TempDir::new().unwrap();
    spendlog(&dir)
        .args(["settings", "rates", "--eur", "0.0007"])
        .assert()
        .success();
    spendlog(&dir)
        .args(["settings", "rates", "--usd", "0.001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency settings saved."));
    spendlog(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.001"))
        .stdout(predicate::str::contains("0.0007"));

    spendlog(&dir)
        .args(["settings", "rates", "--eur", ""])
        .assert()
        .success();
    spendlog(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0007").not())
        .stdout(predicate::str::contains("0.001"));
}

#[test]
fn oversized_amount_is_rejected_and_existing_records_survive() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Tea", "5", "Food", "2025-09-01");
    let huge = "9".repeat(400);
    spendlog(&dir)
        .args(["add", "Yacht", huge.as_str(), "--category", "Fun", "--date", "2025-09-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount:"));
    spendlog(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 1 record(s)."));
}
