use assert_cmd::prelude::*;
use assert_fs::fixture::NamedTempFile;
use predicates::prelude::*;

use std::{fs, path::Path, process::Command};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const MARBLES: &str = "tests/resources/folio/barcode-35047019077817.json";

struct TestState {
    config: NamedTempFile,
}

impl TestState {
    fn init() -> Result<Self> {
        let config = NamedTempFile::new("config.toml")?;
        fs::write(config.as_ref(), "")?;
        Ok(Self { config })
    }

    /// A command which reads only the (empty) temporary configuration file.
    fn bare_cmd(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("folio-lookup")?;
        cmd.env_remove("FOLIO_OKAPI_URL")
            .env_remove("FOLIO_OKAPI_TOKEN")
            .env_remove("FOLIO_TENANT_ID")
            .env_remove("FOLIO_AN_PREFIX")
            .arg("--config")
            .arg(self.config.as_ref());
        Ok(cmd)
    }

    /// A command with every setting provided; the server does not exist.
    fn cmd(&self) -> Result<Command> {
        let mut cmd = self.bare_cmd()?;
        cmd.args([
            "--okapi-url",
            "https://okapi.invalid",
            "--okapi-token",
            "unused token",
            "--tenant-id",
            "unused tenant id",
            "--an-prefix",
            "clc",
        ]);
        Ok(cmd)
    }

    fn set_config(&self, contents: &str) -> Result<()> {
        fs::write(self.config.as_ref(), contents)?;
        Ok(())
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

/// Check that the binary is working properly so we can run `folio-lookup help`.
#[test]
fn runs_help() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.cmd()?;
    cmd.arg("help").assert().success();

    s.close()
}

/// Check that `folio-lookup parse` builds the expected record.
#[test]
fn parse() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.cmd()?;
    cmd.args(["parse", MARBLES]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "accession_number: clc.4f114d62.90b8.4b2b.befb.5d81be6963cc\n",
        ))
        .stdout(predicate::str::contains(
            "title:            Marbles : mania, depression, Michelangelo, and me : a graphic memoir\n",
        ))
        .stdout(predicate::str::contains("author:           Ellen Forney\n"))
        .stdout(predicate::str::contains("year:             2012\n"))
        .stderr(predicate::str::is_empty());

    let mut cmd = s.cmd()?;
    cmd.args([
        "parse",
        "--format",
        "json",
        "tests/resources/folio/instanceid-a6a62669-6d1a-4e90-b9e0-2a029505b2ad.json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#""id": "a6a62669-6d1a-4e90-b9e0-2a029505b2ad""#,
        ))
        .stdout(predicate::str::contains(r#""edition": "Eleventh edition""#))
        .stdout(predicate::str::contains(r#""isbn_issn": "9781259277177""#))
        .stderr(predicate::str::is_empty());

    s.close()
}

/// Check that `folio-lookup parse` reports missing settings and files.
#[test]
fn parse_failures() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.bare_cmd()?;
    cmd.args(["parse", MARBLES]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "Missing configuration setting 'okapi.an_prefix'",
    ));

    let mut cmd = s.cmd()?;
    cmd.args(["parse", "tests/resources/folio/does-not-exist.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read response file"));

    s.close()
}

/// Check that the prefix can be set in the configuration file.
#[test]
fn config_file() -> Result<()> {
    let s = TestState::init()?;
    s.set_config("[okapi]\nan_prefix = \"lib\"\n")?;

    let mut cmd = s.bare_cmd()?;
    cmd.args(["accession-number", "4f114d62-90b8-4b2b-befb-5d81be6963cc"]);
    cmd.assert()
        .success()
        .stdout("lib.4f114d62.90b8.4b2b.befb.5d81be6963cc\n");

    // flags take precedence
    let mut cmd = s.cmd()?;
    cmd.args(["accession-number", "4f114d62-90b8-4b2b-befb-5d81be6963cc"]);
    cmd.assert()
        .success()
        .stdout("clc.4f114d62.90b8.4b2b.befb.5d81be6963cc\n");

    s.set_config("[okapi]\nprefix = \"lib\"\n")?;
    let mut cmd = s.bare_cmd()?;
    cmd.args(["accession-number", "4f114d62-90b8-4b2b-befb-5d81be6963cc"]);
    cmd.assert().failure();

    s.close()
}

/// Check the conversions between accession numbers and instance ids.
#[test]
fn accession_numbers() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.bare_cmd()?;
    cmd.args(["id", "clc.4f114d62.90b8.4b2b.befb.5d81be6963cc"]);
    cmd.assert()
        .success()
        .stdout("4f114d62-90b8-4b2b-befb-5d81be6963cc\n");

    let mut cmd = s.cmd()?;
    cmd.args(["accession-number", "4f114d62-90b8-4b2b-befb-5d81be6963cc"]);
    cmd.assert()
        .success()
        .stdout("clc.4f114d62.90b8.4b2b.befb.5d81be6963cc\n");

    let mut cmd = s.bare_cmd()?;
    cmd.args(["id", "4f114d62-90b8-4b2b-befb-5d81be6963cc"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid accession number"));

    let mut cmd = s.cmd()?;
    cmd.args(["get", "--accession-number", "clc"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid accession number"));

    s.close()
}

/// Check that `folio-lookup get` without an identifier prints the empty record.
#[test]
fn get_empty() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.cmd()?;
    cmd.arg("get");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("id:               \n"))
        .stderr(predicate::str::is_empty());

    let mut cmd = s.cmd()?;
    cmd.args(["get", "--format", "json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""id": """#))
        .stdout(predicate::str::contains(r#""isbn_issn": null"#));

    let mut cmd = s.bare_cmd()?;
    cmd.arg("get");
    cmd.assert().failure().stderr(predicate::str::contains(
        "Missing configuration setting 'okapi.okapi_url'",
    ));

    s.close()
}

/// Check that at most one identifier is accepted.
#[test]
fn get_multiple_identifiers() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.cmd()?;
    cmd.args([
        "get",
        "--barcode",
        "35047019077817",
        "--instance-id",
        "4f114d62-90b8-4b2b-befb-5d81be6963cc",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    s.close()
}

/// Check that the default configuration is printed as-is.
#[test]
fn default_config() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.cmd()?;
    let predicate_file = predicate::path::eq_file(Path::new("src/config/default_config.toml"))
        .utf8()
        .unwrap();
    cmd.arg("default-config");
    cmd.assert().success().stdout(predicate_file);

    s.close()
}

/// Check that `folio-lookup check-config` reports invalid settings.
#[test]
fn check_config() -> Result<()> {
    let s = TestState::init()?;

    let mut cmd = s.bare_cmd()?;
    cmd.arg("check-config");
    cmd.assert().success().stderr(predicate::str::is_empty());

    s.set_config("[okapi]\nokapi_url = \"ftp://okapi.example.edu\"\nan_prefix = \"a.b\"\n")?;
    let mut cmd = s.bare_cmd()?;
    cmd.arg("check-config");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("'okapi.okapi_url'"))
        .stderr(predicate::str::contains("'okapi.an_prefix'"));

    s.close()
}
