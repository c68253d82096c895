mod support;

use jarviz_core::model::Artifact;
use jarviz_core::services::{
    BootstrapScope, ClassLoaderService, ErrorKind, JarClassLoaderService, LocalRepository,
    ScanError,
};
use support::jar_with_classes;

#[test]
fn service_resolves_artifact_and_lists_its_classes() {
    let temp = tempfile::tempdir().unwrap();
    let maven_dir = temp.path().join("com/acme/widget/1.0");
    std::fs::create_dir_all(&maven_dir).unwrap();
    jar_with_classes(&maven_dir, "widget-1.0.jar", &["com.acme.Widget", "com.acme.Gadget"]);

    let service =
        JarClassLoaderService::new(LocalRepository::new(temp.path()), BootstrapScope::empty());
    assert!(service.bootstrap().is_empty());
    let scan = service
        .all_classes(&Artifact::new("com.acme", "widget", "1.0"), &|name: &str| {
            name.ends_with("Widget")
        })
        .expect("scan");
    assert_eq!(scan.class_names(), vec!["com.acme.Widget"]);
}

#[test]
fn unknown_artifact_is_an_illegal_argument() {
    let temp = tempfile::tempdir().unwrap();
    let service =
        JarClassLoaderService::new(LocalRepository::new(temp.path()), BootstrapScope::empty());

    let ghost = Artifact::new("com.acme", "ghost", "0.1");
    let err = service.all_classes(&ghost, &|_: &str| true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(matches!(err, ScanError::ArtifactNotFound(_)));
    assert!(err.to_string().contains("ghost-0.1.jar"));
}

#[test]
fn bootstrap_from_missing_archive_fails() {
    let temp = tempfile::tempdir().unwrap();
    let err = BootstrapScope::from_archives(&[temp.path().join("rt.jar")]).unwrap_err();
    assert!(matches!(err, ScanError::InvalidLocation { .. }));
}
