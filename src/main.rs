use anyhow::{bail, Context, Result};
use quill::buffer::{file_io, parse_encoding};
use quill::search::{find_matches, SearchMode, SearchQuery};
use quill::{utils, Config, Editor, RopeBuffer, Terminal};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

const HELP: &str = "\
quill - A minimal text editor with literal and regex search

USAGE:
  quill [OPTIONS] [FILE]

OPTIONS:
  -r, --regex                  Start with regular-expression search
  -f, --find <PATTERN>         Print matches of PATTERN in FILE (or stdin) and exit
      --encoding <LABEL>       Encoding for files without BOM (e.g. gbk, big5)
      --save-encoding <LABEL>  Encoding used when saving
      --debug                  Enable debug mode
  -h, --help                   Print help
  -V, --version                Print version

KEYBOARD SHORTCUTS:

  File:
    Ctrl+O              Open file
    Ctrl+S              Save file
    Ctrl+Shift+S/Alt+S  Save as
    Ctrl+Q              Quit (press twice if modified)

  Search:
    Ctrl+F              Find text
    F3 / Ctrl+N         Find next match
    Shift+F3 / Ctrl+P   Find previous match
    Ctrl+R              Toggle regular expressions

  View:
    Ctrl+L              Toggle line numbers
    ESC                 Clear selection and messages
";

struct Args {
    file: Option<PathBuf>,
    regex: bool,
    debug: bool,
    find: Option<String>,
    encoding: Option<String>,
    save_encoding: Option<String>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }
    if pargs.contains(["-V", "--version"]) {
        println!("quill {}", env!("CARGO_PKG_VERSION"));
        return Ok(None);
    }

    let args = Args {
        regex: pargs.contains(["-r", "--regex"]),
        debug: pargs.contains("--debug"),
        find: pargs.opt_value_from_str(["-f", "--find"])?,
        encoding: pargs.opt_value_from_str("--encoding")?,
        save_encoding: pargs.opt_value_from_str("--save-encoding")?,
        file: pargs.opt_free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {:?}", remaining);
    }

    Ok(Some(args))
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::new();
    config.debug = args.debug;
    if args.regex {
        config.default_mode = SearchMode::Regex;
    }
    if let Some(label) = &args.encoding {
        config.encoding.read_encoding =
            Some(parse_encoding(label).with_context(|| format!("Unknown encoding: {}", label))?);
    }
    if let Some(label) = &args.save_encoding {
        config.encoding.save_encoding =
            Some(parse_encoding(label).with_context(|| format!("Unknown encoding: {}", label))?);
    }
    Ok(config)
}

/// 非互動模式：列出所有匹配後退出
///
/// 退出碼：0 有匹配，1 無匹配，2 查詢無效
fn run_find(pattern: &str, file: Option<&Path>, config: &Config) -> Result<i32> {
    let text = match file {
        Some(path) => file_io::load(path, config.encoding.read_encoding)?.text,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let query = SearchQuery::new(pattern, config.default_mode);
    let matches = match find_matches(&text, &query) {
        Ok(matches) => matches,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(2);
        }
    };

    let buffer = RopeBuffer::from_text(&text);
    let mut out = io::stdout().lock();
    for span in matches.iter() {
        let matched = buffer.text_range(span.start, span.end);
        writeln!(out, "{}..{}\t{}", span.start, span.end, matched.escape_debug())?;
    }
    out.flush()?;

    eprintln!("{} matches", matches.len());
    Ok(if matches.is_empty() { 1 } else { 0 })
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    // 初始化日誌
    utils::init_logger(args.debug);

    let config = build_config(&args)?;

    if let Some(pattern) = &args.find {
        let code = run_find(pattern, args.file.as_deref(), &config)?;
        std::process::exit(code);
    }

    // 創建並運行編輯器
    let mut editor = Editor::new(args.file.as_deref(), &config)?;

    // 設置 panic hook 以確保終端正常恢復
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = Terminal::exit_raw_mode();
        let _ = Terminal::show_cursor();
        original_hook(panic_info);
    }));

    editor.run()?;

    Ok(())
}
