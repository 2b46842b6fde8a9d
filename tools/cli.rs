use std::fs;
use std::io::{self, Read as _};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use quotescan::{
    DelimiterSpec, QuoteLayering, QuoteVocabulary, RawQuotes, ReadOptions, Scanner, Scope,
    TextReader,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Preset {
    /// No quoting
    None,
    /// `"` with `\` as escape
    Double,
    /// `()`, `[]` and `{}`
    Brackets,
    /// `"` as primary layer, brackets as secondary
    DoubleBrackets,
}

/// Split each line of the input on delimiters found outside of quotes
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to read, stdin if missing
    input: Option<PathBuf>,

    /// Every character of this string is a delimiter
    #[arg(short, long, default_value = ",")]
    delimiters: String,

    /// JSON quote configuration, takes precedence over --preset
    #[arg(short, long)]
    quotes: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Preset::Double)]
    preset: Preset,

    /// Trim blanks around each field
    #[arg(short, long)]
    trim: bool,

    /// Print the delimiter hits of each line as JSON instead of the fields
    #[arg(long)]
    hits: bool,
}

fn layering(args: &Args) -> Result<QuoteLayering, Box<dyn std::error::Error>> {
    if let Some(path) = &args.quotes {
        return Ok(RawQuotes::load_from_file(path)?.compile()?);
    }
    let layering = match args.preset {
        Preset::None => QuoteLayering::none(),
        Preset::Double => QuoteLayering::single(QuoteVocabulary::double_quotes()),
        Preset::Brackets => QuoteLayering::single(QuoteVocabulary::brackets()),
        Preset::DoubleBrackets => {
            QuoteLayering::layered(QuoteVocabulary::double_quotes(), QuoteVocabulary::brackets())?
        }
    };
    Ok(layering)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let layering = layering(&args)?;

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let delimiters: Vec<char> = args.delimiters.chars().collect();
    let options = ReadOptions::new().trim(args.trim);

    for line in input.lines() {
        let delimiter = DelimiterSpec::CharSet(&delimiters);
        if args.hits {
            let scanner = Scanner::new(delimiter, &layering);
            let hits: Vec<_> = scanner.find_all(Scope::whole(line)).collect();
            println!("{}", serde_json::to_string(&hits)?);
        } else {
            let fields: Vec<_> = TextReader::new(line)
                .split(delimiter, &layering, options)
                .collect();
            println!("{}", fields.join("\t"));
        }
    }

    Ok(())
}
