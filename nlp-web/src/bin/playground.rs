//! Playground de linha de comando: anota os textos de demonstração e imprime
//! o resultado de cada esquema.

use anyhow::Context;
use nlp_core::{corpus::demo_texts, Annotation, Annotator, Label, Options, Scheme};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let annotator = Annotator::default();
    println!("Bem-vindo ao playground de anotação ({})", annotator.engine_name());
    println!();

    for demo in demo_texts() {
        println!("[{}] {}", demo.name, demo.text);
        for &scheme in demo.schemes {
            let options = match scheme {
                Scheme::NameType => Options::tagging().join_names(true),
                _ => Options::tagging(),
            };
            let annotations = annotator
                .annotate(demo.text, scheme, &options)
                .with_context(|| format!("anotando \"{}\" com {scheme}", demo.name))?;
            print_scheme(scheme, &annotations);
        }
        println!();
    }
    Ok(())
}

fn print_scheme(scheme: Scheme, annotations: &[Annotation]) {
    match scheme {
        Scheme::LanguageDetection => {
            let language = annotations
                .first()
                .map(|a| a.label.to_string())
                .unwrap_or_else(|| Label::UNKNOWN.to_string());
            println!("  idioma: {language}");
        }
        _ => {
            println!("  {scheme}:");
            for a in annotations {
                println!("    {:<12} {:<22} {}", a.span.to_string(), a.text, a.label);
            }
        }
    }
}
