use std::io::{ self, BufRead, Write };
use anyhow::{ anyhow, bail };
use pdelab::{
    config,
    quiz::{ self, Question, QuizSet, Verdict },
};

const LETTERS: [&str; 4] = ["A", "B", "C", "D"];

fn choose_set(arg: Option<&str>) -> anyhow::Result<&'static QuizSet> {
    let sets = quiz::sets();
    match arg {
        None => sets.first().ok_or_else(|| anyhow!("no quiz sets available")),
        Some(a) => {
            if let Some(set) = quiz::find_set(a) { return Ok(set); }
            match a.parse::<usize>() {
                Ok(k) if (1..=sets.len()).contains(&k) => Ok(&sets[k - 1]),
                _ => bail!("unknown quiz set '{a}'; expected 1..={}", sets.len()),
            }
        },
    }
}

// accepts a letter, a 1-based option number, or the option text itself; a
// blank line leaves the question unanswered
fn interpret(question: &Question, line: &str) -> Option<&'static str> {
    let line = line.trim();
    if line.is_empty() { return None; }
    if let Some(k) = LETTERS.iter().position(|l| l.eq_ignore_ascii_case(line)) {
        return question.option(k);
    }
    if let Ok(k) = line.parse::<usize>() {
        return k.checked_sub(1).and_then(|k| question.option(k));
    }
    question.options.iter().copied().find(|opt| *opt == line)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let (config_path, args) = config::split_config_arg(std::env::args().skip(1));
    let _cfg = config::load(config_path.as_deref());

    println!("可选测验：");
    for (k, set) in quiz::sets().iter().enumerate() {
        println!("  {}. {} ({} 题)", k + 1, set.name, set.questions.len());
    }
    let set = choose_set(args.first().map(String::as_str))?;
    println!("\n== {} ==", set.name);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut responses: Vec<Option<&'static str>> = Vec::with_capacity(set.questions.len());
    for question in set.questions.iter() {
        println!("\n题号 {}：{}", question.id, question.prompt);
        for (letter, opt) in LETTERS.iter().zip(question.options.iter()) {
            println!("  {letter}. {opt}");
        }
        print!("> ");
        stdout.flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        responses.push(interpret(question, &line));
    }

    let report = set.grade(&responses);
    println!();
    for (id, verdict) in report.verdicts.iter() {
        println!("{}", verdict.headline(*id));
        if let Verdict::Incorrect { answer, explanation } = verdict {
            println!("  正确答案：{answer}");
            println!("  解析：{explanation}");
        }
    }
    println!("\n{}", report.summary());
    Ok(())
}
