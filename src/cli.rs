use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "refmatch")]
#[command(about = "参照画像ファイル名を売上シートのレコードに照合", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイル一覧を照合して売上シートにURLを書き込む
    Run {
        /// 売上シート（デフォルト: 設定値）
        #[arg(short, long)]
        sales: Option<PathBuf>,

        /// ファイル一覧Excel（File Name / File URL 列）
        #[arg(short, long)]
        listing: Option<PathBuf>,

        /// 一覧がない場合にスキャンするフォルダ
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// スキャン時のURLの基点
        #[arg(long)]
        base_url: Option<String>,

        /// 出力する売上シート
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 照合詳細ログ
        #[arg(long)]
        audit: Option<PathBuf>,

        /// 採点を並列実行（結果は逐次実行と同じ）
        #[arg(long)]
        parallel: bool,
    },

    /// ファイル名のトークン分解を表示
    Tokenize {
        /// ファイル名
        #[arg(required = true)]
        file_name: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 1ファイルの候補一覧を表示（書き込みなし）
    Explain {
        /// ファイル名
        #[arg(required = true)]
        file_name: String,

        /// 売上シート（デフォルト: 設定値）
        #[arg(short, long)]
        sales: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// スキャン時のURLの基点を設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// URLを書き込む列名を設定
        #[arg(long)]
        set_url_column: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
