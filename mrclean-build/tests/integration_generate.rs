//! End-to-end runs of the builder over source trees on disk.
//!
//! Each test lays out a small crate in a temporary directory, runs
//! `configure().generate()` against it, and inspects what was written.

use std::{
    fs,
    path::{Path, PathBuf},
};

use mrclean_build::{
    configure, Error, GenerationMode, MetadataError, ROOT_FILE_NAME, SANITIZATIONS_FILE_NAME,
};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    fn root(&self) -> PathBuf {
        self.dir.path().join("src/lib.rs")
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn builder(&self) -> mrclean_build::Builder {
        configure()
            .source_root(self.root())
            .out_dir(self.out())
            .runtime_path("::mrclean")
            .emit_rerun_if_changed(false)
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

const USER_MODULE: &str = r"
use mrclean::Sanitize;

#[derive(Debug, Sanitize)]
pub struct Account {
    pub(crate) id: u64,
    pub(crate) email: String,
}

#[derive(Debug)]
pub struct Untagged {
    pub(crate) note: String,
}

pub mod session;
";

const SESSION_MODULE: &str = r"
#[derive(Debug, mrclean::Sanitize)]
pub struct Session(pub(crate) String, #[mrclean(debug)] pub(crate) Option<u32>);
";

fn debug_crate() -> Fixture {
    let fixture = Fixture::new();
    fixture
        .write(
            "src/lib.rs",
            r"
            pub mod user;

            #[derive(mrclean::PackageId)]
            #[package_id(debug = true)]
            struct SanitizePackage;
            ",
        )
        .write("src/user.rs", USER_MODULE)
        .write("src/user/session/mod.rs", SESSION_MODULE);
    fixture
}

#[test]
fn debug_run_writes_root_and_sanitizations() {
    let fixture = debug_crate();
    let report = fixture.builder().generate().unwrap();

    assert_eq!(report.mode, GenerationMode::Debug);
    assert!(report.namespace.is_root());
    assert_eq!(report.generated_functions, 2);
    assert_eq!(report.root_function, fixture.out().join(ROOT_FILE_NAME));

    let root = read(&report.root_function);
    assert!(root.contains("impl<T: ?Sized + ::core::fmt::Debug> SanitizedToString for T"));

    let sanitizations = read(report.sanitizations.as_deref().unwrap());
    assert!(sanitizations.starts_with("// Debug\n"));
    assert!(sanitizations.contains("impl crate::user::Account {"));
    assert!(sanitizations
        .contains("::std::format!(\"Account(id = {}, email = {})\", self.id, self.email)"));
    assert!(sanitizations.contains("impl crate::user::session::Session {"));
    assert!(sanitizations
        .contains("::std::format!(\"Session(0 = {}, 1 = {:?})\", self.0, self.1)"));
    assert!(!sanitizations.contains("Untagged"));
}

#[test]
fn release_marker_emits_identity_bodies() {
    let fixture = debug_crate();
    fixture.write(
        "src/lib.rs",
        r"
        pub mod user;

        #[derive(mrclean::PackageId)]
        #[package_id(debug = false)]
        struct SanitizePackage;
        ",
    );
    let report = fixture.builder().generate().unwrap();

    assert_eq!(report.mode, GenerationMode::Release);
    let root = read(&report.root_function);
    assert!(root.contains("No function generated! Make sure to annotate with @Sanitize"));

    let sanitizations = read(report.sanitizations.as_deref().unwrap());
    assert!(sanitizations.starts_with("// Release\n"));
    assert!(sanitizations.contains("\"Account@{:x}\", ::mrclean::identity_hash(self)"));
    assert!(!sanitizations.contains("self.email"));
}

#[test]
fn marker_module_decides_output_directory() {
    let fixture = Fixture::new();
    fixture
        .write("src/lib.rs", "pub mod user;\n")
        .write(
            "src/user.rs",
            r"
            #[derive(mrclean::PackageId)]
            #[package_id(debug = true)]
            struct SanitizePackage;

            #[derive(mrclean::Sanitize)]
            pub struct Account { pub(crate) id: u64 }
            ",
        );
    let report = fixture.builder().generate().unwrap();

    assert_eq!(report.namespace.to_string(), "user");
    assert_eq!(
        report.sanitizations,
        Some(fixture.out().join("user").join(SANITIZATIONS_FILE_NAME))
    );
    assert_eq!(
        report.root_function,
        fixture.out().join("user").join(ROOT_FILE_NAME)
    );
}

#[test]
fn explicit_configuration_overrides_marker() {
    let fixture = debug_crate();
    let report = fixture
        .builder()
        .mode(GenerationMode::Release)
        .namespace("crate::user")
        .generate()
        .unwrap();

    assert_eq!(report.mode, GenerationMode::Release);
    assert_eq!(report.namespace.to_string(), "user");
    let sanitizations = read(report.sanitizations.as_deref().unwrap());
    assert!(sanitizations.starts_with("// Release\n"));
}

#[test]
fn nothing_tagged_writes_only_root() {
    let fixture = Fixture::new();
    fixture.write(
        "src/lib.rs",
        r"
        #[derive(mrclean::PackageId)]
        #[package_id(debug = true)]
        struct SanitizePackage;

        #[derive(Debug)]
        struct Plain;
        ",
    );
    let report = fixture.builder().generate().unwrap();

    assert!(report.sanitizations.is_none());
    assert_eq!(report.generated_functions, 0);
    assert!(report.root_function.is_file());
    assert!(!fixture.out().join(SANITIZATIONS_FILE_NAME).exists());
}

#[test]
fn stale_sanitizations_are_removed() {
    let fixture = debug_crate();
    let first = fixture.builder().generate().unwrap();
    let stale = first.sanitizations.unwrap();
    assert!(stale.is_file());

    fixture
        .write("src/user.rs", "#[derive(Debug)]\npub struct Account;\npub mod session;\n")
        .write("src/user/session/mod.rs", "");
    let second = fixture.builder().generate().unwrap();

    assert!(second.sanitizations.is_none());
    assert!(!stale.exists());
}

#[test]
fn tagged_enum_fails_before_writing() {
    let fixture = debug_crate();
    fixture.write(
        "src/user/session/mod.rs",
        r"
        #[derive(mrclean::Sanitize)]
        pub enum Session { Active, Expired }
        ",
    );
    let err = fixture.builder().generate().unwrap_err();

    assert!(matches!(
        err,
        Error::Metadata(MetadataError::NotAStruct { ref name, .. }) if name == "user::session::Session"
    ));
    assert!(!fixture.out().exists());
}

#[test]
fn missing_marker_without_configuration_fails() {
    let fixture = Fixture::new();
    fixture.write("src/lib.rs", "#[derive(mrclean::Sanitize)]\nstruct Account { id: u64 }\n");

    let err = fixture.builder().generate().unwrap_err();
    assert!(matches!(err, Error::MissingConfig("generation mode")));

    let err = fixture
        .builder()
        .mode(GenerationMode::Debug)
        .generate()
        .unwrap_err();
    assert!(matches!(err, Error::MissingConfig("package name")));
    assert!(!fixture.out().exists());

    let report = fixture
        .builder()
        .mode(GenerationMode::Debug)
        .namespace("crate")
        .generate()
        .unwrap();
    assert!(report.namespace.is_root());
    assert_eq!(report.generated_functions, 1);
}

#[test]
fn missing_module_file_is_reported() {
    let fixture = Fixture::new();
    fixture.write("src/lib.rs", "mod billing;\n");

    let err = fixture.builder().generate().unwrap_err();
    match err {
        Error::ModuleNotFound { module, candidates, .. } => {
            assert_eq!(module, "billing");
            assert!(candidates.contains("billing.rs"));
            assert!(candidates.contains("mod.rs"));
        }
        other => panic!("expected ModuleNotFound, got {other:?}"),
    }
}

#[test]
fn path_attribute_and_inline_modules_are_followed() {
    let fixture = Fixture::new();
    fixture
        .write(
            "src/lib.rs",
            r#"
            #[derive(mrclean::PackageId)]
            #[package_id(debug = true)]
            struct SanitizePackage;

            #[path = "generated_models/models.rs"]
            mod models;

            mod api {
                pub mod v1;
            }
            "#,
        )
        .write(
            "src/generated_models/models.rs",
            "#[derive(mrclean::Sanitize)]\npub struct Invoice { pub(crate) total: u64 }\n",
        )
        .write(
            "src/api/v1.rs",
            "#[derive(mrclean::Sanitize)]\npub struct Request { pub(crate) path: String }\n",
        );
    let report = fixture.builder().generate().unwrap();

    let sanitizations = read(report.sanitizations.as_deref().unwrap());
    assert!(sanitizations.contains("impl crate::models::Invoice {"));
    assert!(sanitizations.contains("impl crate::api::v1::Request {"));
    assert!(sanitizations.contains(
        "table.register::<crate::api::v1::Request>(crate::api::v1::Request::sanitized_to_string);"
    ));
}

#[test]
fn additional_markers_are_ignored() {
    let fixture = Fixture::new();
    fixture.write(
        "src/lib.rs",
        r"
        #[derive(mrclean::PackageId)]
        #[package_id(debug = false)]
        struct First;

        mod nested {
            #[derive(mrclean::PackageId)]
            #[package_id(debug = true)]
            struct Second;
        }
        ",
    );
    let report = fixture.builder().generate().unwrap();

    assert_eq!(report.mode, GenerationMode::Release);
    assert!(report.namespace.is_root());
}

#[test]
fn test_only_modules_are_not_generated() {
    let fixture = debug_crate();
    fixture
        .write(
            "src/lib.rs",
            r"
            pub mod user;

            #[derive(mrclean::PackageId)]
            #[package_id(debug = true)]
            struct SanitizePackage;

            #[cfg(test)]
            mod tests {
                #[derive(Debug, mrclean::Sanitize)]
                pub(crate) struct Local {
                    pub(crate) id: u64,
                }
            }

            #[cfg(test)]
            mod fixtures;
            ",
        )
        .write(
            "src/fixtures.rs",
            r"
            #[derive(Debug, mrclean::Sanitize)]
            pub(crate) struct Canned(pub(crate) u64);
            ",
        );

    let report = fixture.builder().generate().unwrap();

    assert_eq!(report.generated_functions, 2);
    let sanitizations = read(report.sanitizations.as_deref().unwrap());
    assert!(!sanitizations.contains("crate::tests"));
    assert!(!sanitizations.contains("crate::fixtures"));
    assert!(sanitizations.contains("impl crate::user::Account {"));
}

#[test]
fn test_only_module_files_need_not_exist() {
    let fixture = debug_crate();
    fixture.write(
        "src/lib.rs",
        r"
        pub mod user;

        #[derive(mrclean::PackageId)]
        #[package_id(debug = true)]
        struct SanitizePackage;

        #[cfg(test)]
        mod missing_tests;
        ",
    );

    let report = fixture.builder().generate().unwrap();
    assert_eq!(report.generated_functions, 2);
}

#[test]
fn failed_sanitizations_write_leaves_root_unwritten() {
    let fixture = debug_crate();
    fs::create_dir_all(fixture.out().join("sanitizations.rs.tmp")).unwrap();

    let err = fixture.builder().generate().unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!fixture.out().join(ROOT_FILE_NAME).exists());
    assert!(!fixture.out().join("root_sanitize_function.rs.tmp").exists());
    assert!(!fixture.out().join(SANITIZATIONS_FILE_NAME).exists());
}
