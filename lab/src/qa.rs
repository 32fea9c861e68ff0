use std::io::{ self, BufRead, Write };
use pdelab::{
    chat::{ Assistant, ChatConfig },
    config,
    error::ConfigError,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let (config_path, _args) = config::split_config_arg(std::env::args().skip(1));
    let cfg = config::load(config_path.as_deref());

    let chat_config = match ChatConfig::from_settings(&cfg.chat) {
        Ok(chat_config) => chat_config,
        Err(ConfigError::MissingApiKey(name)) => {
            log::warn!("no API key for {name}; answering offline");
            println!("{}", cfg.chat.source.missing_key_warning());
            ChatConfig::offline()
        },
        Err(err) => return Err(err.into()),
    };
    println!("模型来源：{}", chat_config.source.label());
    println!("{}", chat_config.notice());
    println!("输入问题后回车；输入 exit 或 quit 退出。");

    let mut assistant = Assistant::new(chat_config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("\n> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let prompt = line.trim();
        match prompt {
            "" => { },
            "exit" | "quit" => break,
            _ => {
                let answer = assistant.ask(prompt);
                println!("\n{answer}");
            },
        }
        print!("\n> ");
        stdout.flush()?;
    }
    println!();
    log::debug!("session ended after {} turns", assistant.history().len());
    Ok(())
}
