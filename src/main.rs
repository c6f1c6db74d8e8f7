use routeview::cli::{App, Args};

#[tokio::main]
async fn main() -> routeview::Result<()> {
    let args = Args::parse_args();
    let mut app = App::from_args(&args)?;

    app.run(args).await?;

    Ok(())
}
