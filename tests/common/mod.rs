// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Builds temporary template directories and reads axum responses

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response, StatusCode};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TemplateDirBuilder {
    templates: Vec<(String, String)>,
}

impl TemplateDirBuilder {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    pub fn with_template(mut self, name: &str, source: &str) -> Self {
        self.templates.push((name.to_string(), source.to_string()));
        self
    }

    /// The classic greeting templates for both engines
    pub fn with_hello(self) -> Self {
        self.with_template("hello.hbs", "Hello, {{person.name}}!")
            .with_template("hello.tera", "Hello, {{ person.name }}!")
    }

    pub fn build(self) -> TemplateDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join("templates");
        fs::create_dir_all(&root).expect("Failed to create template root");

        for (name, source) in &self.templates {
            let path = root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create template subdirectory");
            }
            fs::write(&path, source).expect("Failed to write template");
        }

        TemplateDir { _dir: dir, root }
    }
}

pub struct TemplateDir {
    _dir: TempDir,
    root: PathBuf,
}

impl TemplateDir {
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory holding the template root, for configs and output files
    pub fn parent(&self) -> &Path {
        self._dir.path()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

pub async fn read_body(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8_lossy(&bytes).to_string())
}
