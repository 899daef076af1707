use clap::Parser;
use dialoguer::Confirm;
use rag_console::{cli, client, config, error, output};
use cli::{
    ChunkAction, Cli, Commands, EmbedAction, GenerationAction, ImportAction, RetrievalAction,
    VectorDbAction,
};
use client::ApiClient;
use config::Config;
use error::{ConsoleError, Result};
use rag_console_common::{ImportRecord, RouteTable, Router, Session, IMPORTED_AT_FORMAT};
use tracing::Level;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(server) = &cli.server {
        config.set_server_url(server.clone())?;
    }

    match cli.command {
        Commands::Import { action } => {
            let client = ApiClient::new(&config)?;
            let mut session = Session::start();
            run_import(&client, &mut session, action, cli.json).await?;
            session.end();
        }

        Commands::Chunk { action } => {
            let client = ApiClient::new(&config)?;
            match action {
                ChunkAction::Run { method, size, overlap } => {
                    let pb = output::spinner("テキスト分割中...");
                    let result = client.process_chunks(&method, size, overlap).await;
                    pb.finish_and_clear();
                    let result = result?;
                    if cli.json {
                        output::print_json(&result)?;
                    } else {
                        println!(
                            "✔ {} (ID: {}, チャンク数: {})",
                            result.message, result.chunk_id, result.total_chunks
                        );
                    }
                }
                ChunkAction::List => {
                    let chunks = client.chunk_list().await?;
                    if cli.json {
                        output::print_json(&chunks)?;
                    } else {
                        let rows: Vec<Vec<String>> = chunks
                            .iter()
                            .map(|c| {
                                vec![
                                    c.id.clone(),
                                    c.method.clone(),
                                    c.chunk_size.to_string(),
                                    c.overlap_size.to_string(),
                                    c.total_chunks.to_string(),
                                    c.process_time.clone(),
                                    c.status.clone(),
                                ]
                            })
                            .collect();
                        output::print_table(
                            &["ID", "方式", "サイズ", "重なり", "チャンク数", "処理時刻", "状態"],
                            &rows,
                        );
                    }
                }
            }
        }

        Commands::Embed { action } => {
            let client = ApiClient::new(&config)?;
            match action {
                EmbedAction::Run { model, batch_size } => {
                    let pb = output::spinner("ベクトル埋め込み中...");
                    let result = client.process_embed(&model, batch_size).await;
                    pb.finish_and_clear();
                    let result = result?;
                    if cli.json {
                        output::print_json(&result)?;
                    } else {
                        println!(
                            "✔ {} (ID: {}, ベクトル数: {})",
                            result.message, result.vector_id, result.total_vectors
                        );
                    }
                }
                EmbedAction::List => {
                    let vectors = client.vector_list().await?;
                    if cli.json {
                        output::print_json(&vectors)?;
                    } else {
                        let rows: Vec<Vec<String>> = vectors
                            .iter()
                            .map(|v| {
                                vec![
                                    v.id.clone(),
                                    v.model.clone(),
                                    v.batch_size.to_string(),
                                    v.total_vectors.to_string(),
                                    v.dimension.to_string(),
                                    v.process_time.clone(),
                                    v.status.clone(),
                                ]
                            })
                            .collect();
                        output::print_table(
                            &["ID", "モデル", "バッチ", "ベクトル数", "次元", "処理時刻", "状態"],
                            &rows,
                        );
                    }
                }
            }
        }

        Commands::VectorDb { action } => {
            let client = ApiClient::new(&config)?;
            match action {
                VectorDbAction::Store { db_type, collection } => {
                    let pb = output::spinner("ベクトル格納中...");
                    let result = client.store_vectors(&db_type, &collection).await;
                    pb.finish_and_clear();
                    let result = result?;
                    if cli.json {
                        output::print_json(&result)?;
                    } else {
                        println!("✔ {} (コレクションID: {})", result.message, result.collection_id);
                    }
                }
                VectorDbAction::List => {
                    let collections = client.collection_list().await?;
                    if cli.json {
                        output::print_json(&collections)?;
                    } else {
                        let rows: Vec<Vec<String>> = collections
                            .iter()
                            .map(|c| {
                                vec![
                                    c.id.clone(),
                                    c.name.clone(),
                                    c.db_type.clone(),
                                    c.vector_count.to_string(),
                                    c.create_time.clone(),
                                    c.status.clone(),
                                ]
                            })
                            .collect();
                        output::print_table(
                            &["ID", "名前", "DB", "ベクトル数", "作成時刻", "状態"],
                            &rows,
                        );
                    }
                }
            }
        }

        Commands::Retrieval { action } => {
            let client = ApiClient::new(&config)?;
            match action {
                RetrievalAction::Search { query, top_k } => {
                    let pb = output::spinner("検索中...");
                    let result = client.search(&query, top_k).await;
                    pb.finish_and_clear();
                    let result = result?;
                    if cli.json {
                        output::print_json(&result)?;
                    } else {
                        println!("🔍 「{}」の検索結果: {}件\n", result.query, result.results.len());
                        for (i, hit) in result.results.iter().enumerate() {
                            println!("[{}] score={:.3} {}", i + 1, hit.score, hit.content);
                        }
                    }
                }
                RetrievalAction::History => {
                    let history = client.search_history().await?;
                    if cli.json {
                        output::print_json(&history)?;
                    } else {
                        let rows: Vec<Vec<String>> = history
                            .iter()
                            .map(|h| {
                                vec![
                                    h.search_time.clone(),
                                    h.query.clone(),
                                    h.top_k.to_string(),
                                    h.results_count.to_string(),
                                ]
                            })
                            .collect();
                        output::print_table(&["検索時刻", "クエリ", "top_k", "件数"], &rows);
                    }
                }
            }
        }

        Commands::Generation { action } => {
            let client = ApiClient::new(&config)?;
            match action {
                GenerationAction::Run { query, context, model } => {
                    let pb = output::spinner("生成中...");
                    let result = client.generate(&query, &context, &model).await;
                    pb.finish_and_clear();
                    let result = result?;
                    if cli.json {
                        output::print_json(&result)?;
                    } else {
                        println!("🤖 {} (コンテキスト: {}件)\n", result.model, result.context_used);
                        println!("{}", result.generated_content);
                    }
                }
                GenerationAction::History => {
                    let history = client.generation_history().await?;
                    if cli.json {
                        output::print_json(&history)?;
                    } else {
                        let rows: Vec<Vec<String>> = history
                            .iter()
                            .map(|h| {
                                vec![
                                    h.generation_time.clone(),
                                    h.query.clone(),
                                    h.model.clone(),
                                    h.context_count.to_string(),
                                    h.content_length.to_string(),
                                ]
                            })
                            .collect();
                        output::print_table(
                            &["生成時刻", "質問", "モデル", "コンテキスト", "文字数"],
                            &rows,
                        );
                    }
                }
            }
        }

        Commands::Routes { path } => {
            let table = RouteTable::pipeline();
            match path {
                Some(path) => {
                    let mut router = Router::new(table);
                    let resolution = router.navigate(&path);
                    println!("{}", output::describe_resolution(resolution));
                }
                None => output::print_table(&["パス", "画面"], &output::route_rows(&table)),
            }
        }

        Commands::Health => {
            let client = ApiClient::new(&config)?;
            let status = client.health().await?;
            println!("✔ {} : {}", config.server_url, status);
        }

        Commands::Config { set_server_url, show } => {
            if let Some(url) = set_server_url {
                config.set_server_url(url)?;
                config.save()?;
                println!("✔ サーバURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  サーバURL: {}", config.server_url);
                println!("  APIベース: {}", config.api_base());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

async fn run_import(
    client: &ApiClient,
    session: &mut Session,
    action: ImportAction,
    json: bool,
) -> Result<()> {
    match action {
        ImportAction::Upload { file_type, file_format, pdf_parser } => {
            println!("📥 rag-console - データ取込\n");

            session.app.set_loading(true);
            session.data_import.begin_upload();
            let pb = output::spinner("アップロード・処理中...");
            let result = client
                .upload_file(&file_type, &file_format, pdf_parser.as_deref())
                .await;
            pb.finish_and_clear();
            session.app.set_loading(false);
            let result = result?;

            let imported_at = chrono::Local::now().format(IMPORTED_AT_FORMAT).to_string();
            session.data_import.complete_upload(ImportRecord::from_upload(
                &result,
                &file_type,
                &file_format,
                pdf_parser.as_deref(),
                imported_at,
            ));

            if json {
                let history: Vec<_> = session.data_import.import_history().collect();
                output::print_json(&history)?;
            } else {
                for record in session.data_import.import_history() {
                    println!("✔ {} ({})", record.message, record.imported_at);
                    println!("  ファイルID: {}", record.file_id);
                    println!("  種別/形式: {} / {}", record.file_type, record.file_format);
                    if let Some(parser) = &record.pdf_parser {
                        println!("  PDFパーサ: {}", parser);
                    }
                    println!("  チャンク数: {}", record.processed_chunks);
                }
            }
        }

        ImportAction::List => {
            session.data_import.set_files(client.file_list().await?);
            let files = session.data_import.files();
            if json {
                output::print_json(&files)?;
            } else if files.is_empty() {
                println!("取込済みファイルはありません");
            } else {
                let rows: Vec<Vec<String>> = files
                    .iter()
                    .map(|f| {
                        vec![
                            f.id.clone(),
                            f.name.clone(),
                            f.format.clone(),
                            f.file_type.clone(),
                            f.size.to_string(),
                            f.upload_time.clone(),
                            match &f.error_message {
                                Some(msg) if f.is_error() => format!("{} ({})", f.status, msg),
                                _ => f.status.clone(),
                            },
                        ]
                    })
                    .collect();
                output::print_table(
                    &["ID", "ファイル名", "形式", "種別", "サイズ", "アップロード時刻", "状態"],
                    &rows,
                );
            }
        }

        ImportAction::Delete { file_id, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("ファイル {} を削除しますか？", file_id))
                    .default(false)
                    .interact()
                    .map_err(|e| ConsoleError::Prompt(e.to_string()))?;
                if !confirmed {
                    return Err(ConsoleError::Aborted);
                }
            }

            let result = client.delete_file(&file_id).await?;
            if json {
                output::print_json(&result)?;
            } else {
                println!("✔ {} ({})", result.message, result.file_id);
            }
        }
    }

    Ok(())
}
