use jarviz_core::model::{Artifact, Method};
use jarviz_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn artifact_coordinates_map_to_jar_names() {
    let artifact = Artifact::parse("org.example:lib:2.1:jar:tests").expect("coordinate");
    assert_eq!(artifact.to_file_name(), "lib-2.1-tests.jar");
    assert_eq!(artifact.to_string(), "org.example:lib:2.1:jar:tests");
}

#[test]
fn method_display_joins_owner_name_and_descriptor() {
    let method = Method::new("java.lang.String", "valueOf", "(I)Ljava/lang/String;");
    assert_eq!(method.to_string(), "java.lang.String.valueOf(I)Ljava/lang/String;");
    assert_eq!(method.package_name(), "java.lang");
}

#[test]
fn classifier_builder_matches_parsed_coordinate() {
    let built = Artifact::new("org.example", "lib", "2.1").with_classifier("tests");
    assert_eq!(built.to_file_name(), "lib-2.1-tests.jar");
    assert_eq!(built.to_string(), "org.example:lib:2.1:jar:tests");
}
