use clap::Parser;
use refmatch::{cli, config, error, pipeline, sheet};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use refmatch_common::{rank_candidates, tokenize_filename, RecordStore, DEFAULT_TABLE};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Err(e) = execute(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Run { sales, listing, folder, base_url, output, audit, parallel } => {
            println!("🔗 refmatch - 参照画像の照合\n");

            let options = pipeline::RunOptions {
                sales_file: sales.unwrap_or_else(|| config.sales_file.clone()),
                listing_file: listing.unwrap_or_else(|| config.listing_file.clone()),
                folder,
                base_url: base_url.or_else(|| config.base_url.clone()),
                output_file: output.unwrap_or_else(|| config.output_file.clone()),
                audit_file: audit.unwrap_or_else(|| config.audit_file.clone()),
                url_column: config.url_column.clone(),
                parallel,
                progress_interval: config.progress_interval,
            };

            let report = pipeline::run(&options, &DEFAULT_TABLE)?;

            if !report.sheet_saved || !report.audit_saved {
                println!("⚠ 保存に失敗したファイルがあります。権限や開いているファイルを確認してください");
            }
            println!(
                "\n✅ 完了: {}件中{}件を{}件のレコードに照合",
                report.summary.total_files, report.summary.matched_files, report.record_count
            );
        }

        Commands::Tokenize { file_name, json } => {
            let tokens = tokenize_filename(&file_name);

            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                println!("ファイル名: {}", file_name);
                println!("  製品: {}", tokens.product);
                println!("  スコープ: {}", tokens.scope);
                println!("  業種: {}", tokens.industry);
                println!("  会社: {}", tokens.company);
                println!("  パーツ: {}", tokens.raw_parts.join(" | "));
            }
        }

        Commands::Explain { file_name, sales, json } => {
            let sales_file = sales.unwrap_or_else(|| config.sales_file.clone());
            let sheet = sheet::reader::read_sales_sheet(&sales_file, &config.url_column)?;
            let store = RecordStore::new(sheet.to_records());

            let tokens = tokenize_filename(&file_name);
            let candidates = rank_candidates(&tokens, store.records(), &DEFAULT_TABLE);

            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else if candidates.is_empty() {
                println!("該当なし (閾値 {:.2})", DEFAULT_TABLE.threshold);
            } else {
                for (rank, candidate) in candidates.iter().enumerate() {
                    let record = &store.records()[candidate.record_id];
                    println!(
                        "{}. {} - {} (スコア {:.2}, {})",
                        rank + 1,
                        record.company_name,
                        record.industry,
                        candidate.score,
                        candidate.strength
                    );
                    for reason in &candidate.reasons {
                        println!("     - {}", reason);
                    }
                }
            }
        }

        Commands::Config { set_base_url, set_url_column, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ 基点URLを設定しました");
            }

            if let Some(column) = set_url_column {
                config.set_url_column(column)?;
                println!("✔ URL列名を設定しました");
            }

            if show {
                println!("設定:");
                println!("  売上シート: {}", config.sales_file.display());
                println!("  ファイル一覧: {}", config.listing_file.display());
                println!("  出力シート: {}", config.output_file.display());
                println!("  照合詳細ログ: {}", config.audit_file.display());
                println!("  URL列: {}", config.url_column);
                println!("  基点URL: {}", config.base_url.as_deref().unwrap_or("未設定"));
                println!("  進捗表示間隔: {}", config.progress_interval);
            }
        }
    }

    Ok(())
}
