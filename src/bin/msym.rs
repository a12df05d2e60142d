//! msym CLI - inspect math symbol resolution and axis alignment

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use mathsym::{
    check_builtin_tables,
    diagnostics::format_diagnostics,
    placement_offset, resolve_symbol_traced, AtomType, BuildResult, CharacterMetrics, FontOptions,
    GlyphNode, Mode, RenderOptions, SymbolRequest,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "msym")]
#[command(version)]
#[command(about = "Resolve math symbols to fonts and glyph placements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Resolve a symbol and print the glyphs it is drawn with
    Resolve {
        /// Symbol to resolve
        symbol: String,

        /// Math or text mode
        #[arg(short, long, value_enum, default_value_t = ModeArg::Math)]
        mode: ModeArg,

        /// Atom type (ord, bin, rel, op, open, close, punct, inner, spacing)
        #[arg(short, long, default_value = "ord")]
        atom: String,

        /// Request the symbol's variant form
        #[arg(long)]
        variant: bool,

        /// Override font family
        #[arg(short, long)]
        font: Option<String>,

        /// Bold override font
        #[arg(long, requires = "font")]
        bold: bool,

        /// Italic override font
        #[arg(long, requires = "font")]
        italic: bool,

        /// Fallback families tried when the override font lacks the glyph
        #[arg(long = "fallback", requires = "font")]
        fallbacks: Vec<String>,

        /// Disable axis centering
        #[arg(long)]
        no_center: bool,

        /// Keep short variables on the numeral baseline
        #[arg(long)]
        force_baseline: bool,

        /// Device units per em
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },

    /// Compute the axis placement for raw glyph dimensions
    Align {
        /// Glyph height in em
        #[arg(long, allow_negative_numbers = true)]
        height: f64,

        /// Glyph depth in em
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        depth: f64,

        /// Atom type
        #[arg(short, long, default_value = "ord")]
        atom: String,

        /// Keep short variables on the numeral baseline
        #[arg(long)]
        force_baseline: bool,
    },

    /// Check the builtin tables for inconsistencies
    Check {
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Math,
    Text,
}

#[cfg(feature = "cli")]
impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Math => Mode::Math,
            ModeArg::Text => Mode::Text,
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Resolve {
            symbol,
            mode,
            atom,
            variant,
            font,
            bold,
            italic,
            fallbacks,
            no_center,
            force_baseline,
            scale,
        } => {
            let atom_type = parse_atom(&atom);
            let font = font.map(|family| {
                let mut font = FontOptions::new(family);
                if bold {
                    font = font.bold();
                }
                if italic {
                    font = font.italic();
                }
                font.with_fallback(fallbacks.into_iter().map(FontOptions::new).collect())
            });
            let options = RenderOptions::sized(scale)
                .with_center_operators(!no_center)
                .with_force_variable_baseline(force_baseline);

            let mut request = SymbolRequest::new(&symbol, atom_type, mode.into());
            if variant {
                request = request.with_variant();
            }
            if let Some(ref font) = font {
                request = request.with_font(font);
            }

            let (result, path) = resolve_symbol_traced(&request, &options);
            println!("path: {}", path.as_str());
            print_result(&result);
            0
        }
        Commands::Align {
            height,
            depth,
            atom,
            force_baseline,
        } => {
            let atom_type = parse_atom(&atom);
            let metrics = CharacterMetrics::new(depth, height, 0.0, 0.0, 0.0);
            let options = RenderOptions::default().with_force_variable_baseline(force_baseline);
            let placement = placement_offset(Some(&metrics), Some(atom_type), &options);
            println!("vertical offset: {:.5}", placement.vertical_offset);
            if let Some(height) = placement.reported_height {
                println!("reported height: {:.5}", height);
            }
            0
        }
        Commands::Check { no_color } => {
            let result = check_builtin_tables();
            println!("{}", format_diagnostics(&result, !no_color));
            if result.has_errors() {
                1
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[cfg(feature = "cli")]
fn parse_atom(name: &str) -> AtomType {
    AtomType::from_name(name).unwrap_or_else(|| {
        eprintln!("Error: unknown atom type '{}'", name);
        std::process::exit(2);
    })
}

#[cfg(feature = "cli")]
fn print_result(result: &BuildResult<GlyphNode>) {
    println!("italic: {:.5}", result.italic);
    println!("skew: {:.5}", result.skew);
    print_node(&result.element, 0);
}

#[cfg(feature = "cli")]
fn print_node(node: &GlyphNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        GlyphNode::Glyph(glyph) => {
            let dims = match glyph.metrics {
                Some(m) => format!("h={:.5} d={:.5} w={:.5}", m.height, m.depth, m.width),
                None => "no metrics".to_string(),
            };
            println!(
                "{}'{}' {} [{}] shift={:.5}",
                indent,
                glyph.text,
                glyph.font,
                dims,
                glyph.vertical_offset
            );
        }
        GlyphNode::Row(children) => {
            println!("{}row", indent);
            children.iter().for_each(|c| print_node(c, depth + 1));
        }
        GlyphNode::Overlay { base, overlay } => {
            println!("{}overlay", indent);
            print_node(base, depth + 1);
            print_node(overlay, depth + 1);
        }
        GlyphNode::Compacted {
            left,
            right,
            spacing,
        } => {
            println!("{}compacted spacing={:.5}", indent, spacing);
            print_node(left, depth + 1);
            print_node(right, depth + 1);
        }
        GlyphNode::DecoratedEqual {
            decoration,
            equal,
            mark,
        } => {
            println!("{}decorated {:?}", indent, decoration);
            print_node(equal, depth + 1);
            print_node(mark, depth + 1);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
}
