use anyhow::Result;
use clap::Parser;

use question_paper_gen::app::App;
use question_paper_gen::cli::Cli;
use question_paper_gen::config::Config;
use question_paper_gen::logger;

#[tokio::main]
async fn main() {
    // 初始化日志（全部走 stderr）
    logger::init();

    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    if let Err(e) = run(config, cli).await {
        // 错误通道：单个 JSON 对象输出到 stdout，进程非零退出
        let payload = serde_json::json!({
            "error": e.to_string(),
            "trace": format!("{:?}", e),
        });
        println!("{}", payload);
        std::process::exit(1);
    }
}

async fn run(config: Config, cli: Cli) -> Result<()> {
    App::initialize(config)?.run(cli.command).await
}
