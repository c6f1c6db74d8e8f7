// ABOUTME: Greets known people on /hello/:name with a Handlebars template
// ABOUTME: Run with `cargo run --example hello` and visit http://127.0.0.1:4567/hello/ada

use anyhow::Result;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

use routeview::route::{
    RouteBinding, RouteError, RouteRequest, RouteResponse, RouteResult, TemplateRoute,
    TemplateRouter,
};
use routeview::template::{EngineOptions, HandlebarsEngine, TemplateEngine, TemplateExt};

#[derive(Serialize)]
struct Person {
    name: String,
}

impl Person {
    fn find(name: &str) -> Option<Person> {
        ["Ada", "Grace", "Barbara"]
            .iter()
            .find(|known| known.eq_ignore_ascii_case(name))
            .map(|known| Person {
                name: known.to_string(),
            })
    }
}

struct HelloRoute {
    binding: RouteBinding<HandlebarsEngine>,
}

impl TemplateRoute for HelloRoute {
    type Engine = HandlebarsEngine;

    fn binding(&self) -> &RouteBinding<HandlebarsEngine> {
        &self.binding
    }

    fn handle(&self, request: &RouteRequest, _: &mut RouteResponse) -> RouteResult<String> {
        let name = request.params("name").unwrap_or_default();
        let person =
            Person::find(name).ok_or_else(|| RouteError::NotFound(format!("Person '{}'", name)))?;
        Ok(self.template("hello.hbs")?.render_with("person", person)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let engine = HandlebarsEngine::from_directory(
        concat!(env!("CARGO_MANIFEST_DIR"), "/demos/templates"),
        EngineOptions::default(),
    )?;
    let route = HelloRoute {
        binding: RouteBinding::new("/hello/:name", Arc::new(engine))?,
    };

    let addr: SocketAddr = ([127, 0, 0, 1], 4567).into();
    TemplateRouter::new().get(route)?.serve(addr).await
}
