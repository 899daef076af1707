use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rag-console")]
#[command(about = "RAG全流程パイプライン管理コンソール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// サーバURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// 結果をJSONで出力
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// データ取込
    Import {
        #[command(subcommand)]
        action: ImportAction,
    },

    /// テキスト分割
    Chunk {
        #[command(subcommand)]
        action: ChunkAction,
    },

    /// ベクトル埋め込み
    Embed {
        #[command(subcommand)]
        action: EmbedAction,
    },

    /// ベクトルDB
    VectorDb {
        #[command(subcommand)]
        action: VectorDbAction,
    },

    /// 検索
    Retrieval {
        #[command(subcommand)]
        action: RetrievalAction,
    },

    /// 生成
    Generation {
        #[command(subcommand)]
        action: GenerationAction,
    },

    /// 画面ルートの一覧を表示（パス指定時は解決結果を表示）
    Routes {
        /// 解決するパス（例: /, /vector-db/config）
        path: Option<String>,
    },

    /// サーバのヘルスチェック
    Health,

    /// 設定を表示/編集
    Config {
        /// サーバURLを設定
        #[arg(long)]
        set_server_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum ImportAction {
    /// ファイルをアップロードして処理
    Upload {
        /// ファイル種別 (structured/semi-structured/unstructured)
        #[arg(long)]
        file_type: String,

        /// ファイル形式 (excel/txt/markdown/pdf/word)
        #[arg(long)]
        file_format: String,

        /// PDFパーサ (PyPDF/PyMuPDF)
        #[arg(long)]
        pdf_parser: Option<String>,
    },

    /// 取込済みファイルの一覧
    List,

    /// ファイルを削除
    Delete {
        /// ファイルID
        #[arg(required = true)]
        file_id: String,

        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ChunkAction {
    /// 分割処理を実行
    Run {
        /// 分割方式
        #[arg(short, long)]
        method: String,

        /// チャンクサイズ（文字数）
        #[arg(short, long)]
        size: u32,

        /// オーバーラップ（文字数）
        #[arg(short, long)]
        overlap: u32,
    },

    /// 分割結果の一覧
    List,
}

#[derive(Subcommand)]
pub enum EmbedAction {
    /// 埋め込み処理を実行
    Run {
        /// 埋め込みモデル
        #[arg(short, long)]
        model: String,

        /// バッチサイズ
        #[arg(short, long)]
        batch_size: u32,
    },

    /// 埋め込み結果の一覧
    List,
}

#[derive(Subcommand)]
pub enum VectorDbAction {
    /// ベクトルをコレクションに格納
    Store {
        /// データベース種別
        #[arg(short, long)]
        db_type: String,

        /// コレクション名
        #[arg(short, long)]
        collection: String,
    },

    /// コレクションの一覧
    List,
}

#[derive(Subcommand)]
pub enum RetrievalAction {
    /// ベクトル検索
    Search {
        /// 検索クエリ
        #[arg(required = true)]
        query: String,

        /// 取得件数
        #[arg(short = 'k', long, default_value = "5")]
        top_k: u32,
    },

    /// 検索履歴
    History,
}

#[derive(Subcommand)]
pub enum GenerationAction {
    /// 回答を生成
    Run {
        /// 質問
        #[arg(required = true)]
        query: String,

        /// コンテキスト（複数指定可）
        #[arg(short, long)]
        context: Vec<String>,

        /// 生成モデル
        #[arg(short, long, default_value = "gpt-3.5-turbo")]
        model: String,
    },

    /// 生成履歴
    History,
}
