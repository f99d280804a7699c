use orderengine_demo::DemoConfig;

fn main() -> anyhow::Result<()> {
    orderengine_observability::init();

    let config = DemoConfig::from_env()?;
    tracing::info!(
        mode = ?config.mode,
        tax = config.tax_strategy().as_str(),
        validators = ?config.validators,
        "starting order engine demo"
    );

    let output = orderengine_demo::run(&config)?;
    println!("{output}");

    Ok(())
}
