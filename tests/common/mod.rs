// Shared fixtures for integration tests
#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const VERSION_TEMPLATE: &str = "{\"VERSION\": {\"MAJOR\": {{ ver_major }}, \"MINOR\": {{ ver_minor }}, \"PATCH\": {{ ver_patch }}, \"BUILD\": {{ ver_build }}}}\n";

pub const ASSEMBLY_TEMPLATE: &str = "[assembly: AssemblyVersionAttribute(\"{{ ver_major }}.{{ ver_minor }}.{{ ver_patch }}\")]\n[assembly: KSPAssembly(\"Shabby\", {{ ver_major }}, {{ ver_minor }}, {{ ver_patch }})]\n// {{ tag }}\n";

/// Initialise a repository with a configured test identity
pub fn init_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    (temp_dir, repo)
}

/// Write `content` to `file` and commit it on HEAD
pub fn commit_file(repo: &Repository, file: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().expect("Repository has a workdir");
    fs::write(workdir.join(file), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(file))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = signature();

    let parent = repo
        .head()
        .ok()
        .and_then(|head| head.target())
        .map(|oid| repo.find_commit(oid).expect("Could not find parent"));
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

/// Create an annotated tag on `oid`
pub fn annotated_tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).expect("Could not find object");
    repo.tag(name, &object, &signature(), name, false)
        .expect("Could not create tag");
}

/// Create a lightweight tag on `oid`
pub fn lightweight_tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).expect("Could not find object");
    repo.tag_lightweight(name, &object, false)
        .expect("Could not create tag");
}

/// Lay out the default template tree and output directories under `root`
pub fn write_default_templates(root: &Path) {
    let templates = root.join("Templates");
    fs::create_dir_all(templates.join("Assets")).unwrap();
    fs::create_dir_all(templates.join("Source/assembly")).unwrap();
    fs::write(templates.join("Assets/Shabby.version"), VERSION_TEMPLATE).unwrap();
    fs::write(
        templates.join("Source/assembly/AssemblyInfo.cs"),
        ASSEMBLY_TEMPLATE,
    )
    .unwrap();

    fs::create_dir_all(root.join("Assets")).unwrap();
    fs::create_dir_all(root.join("Source/assembly")).unwrap();
}

/// Short hash the way `git describe` abbreviates it
pub fn short_hash(oid: Oid) -> String {
    oid.to_string()[..7].to_string()
}

fn signature() -> Signature<'static> {
    Signature::now("Test User", "test@example.com").expect("Could not create signature")
}
