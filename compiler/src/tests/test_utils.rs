use std::path::PathBuf;

pub fn get_test_resource(name: &str) -> String {
    let path = PathBuf::from_iter([env!("CARGO_MANIFEST_DIR"), "resources", "test", name]);
    // Only ever runs within a unit test
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Unable to read test resource {}: {e}", path.display()))
}
