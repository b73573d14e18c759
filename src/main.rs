use clap::Parser;
use dev_aura_app::Args;
use log::error;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let insights = match dev_aura_app::developer_insights(&args).await {
        Ok(insights) => insights,
        Err(err) => {
            error!("{:?}", err);
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    match dev_aura_app::render(&insights, args.format) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }

    if let Err(err) = dev_aura_app::write_aura(&insights, &args) {
        eprintln!("Failed to write aura: {}", err);
        std::process::exit(1);
    }
}
