//! パイプラインステージ定義
//!
//! RAGワークフローの6ステージと、各ステージが持つ2つの画面（設定/管理）。
//! ルートテーブルはこの列挙から生成される。

use serde::{Deserialize, Serialize};

/// パイプラインステージ（処理順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    DataImport,
    TextChunk,
    VectorEmbed,
    VectorDb,
    Retrieval,
    Generation,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::DataImport,
        Stage::TextChunk,
        Stage::VectorEmbed,
        Stage::VectorDb,
        Stage::Retrieval,
        Stage::Generation,
    ];

    /// URLスラッグ
    pub fn slug(&self) -> &'static str {
        match self {
            Stage::DataImport => "data-import",
            Stage::TextChunk => "text-chunk",
            Stage::VectorEmbed => "vector-embed",
            Stage::VectorDb => "vector-db",
            Stage::Retrieval => "retrieval",
            Stage::Generation => "generation",
        }
    }

    /// 表示名
    pub fn label(&self) -> &'static str {
        match self {
            Stage::DataImport => "データ取込",
            Stage::TextChunk => "テキスト分割",
            Stage::VectorEmbed => "ベクトル埋め込み",
            Stage::VectorDb => "ベクトルDB",
            Stage::Retrieval => "検索",
            Stage::Generation => "生成",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    /// 指定画面のパス（例: `/data-import/config`）
    pub fn path(&self, view: StageView) -> String {
        format!("/{}/{}", self.slug(), view.slug())
    }
}

/// ステージ内の画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageView {
    Config,
    Management,
}

impl StageView {
    pub const ALL: [StageView; 2] = [StageView::Config, StageView::Management];

    pub fn slug(&self) -> &'static str {
        match self {
            StageView::Config => "config",
            StageView::Management => "management",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StageView::Config => "設定",
            StageView::Management => "管理",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_slug(stage.slug()), Some(stage));
        }
    }

    #[test]
    fn test_from_slug_unknown() {
        assert_eq!(Stage::from_slug("reranking"), None);
        assert_eq!(Stage::from_slug(""), None);
    }

    #[test]
    fn test_path() {
        assert_eq!(Stage::DataImport.path(StageView::Config), "/data-import/config");
        assert_eq!(Stage::VectorDb.path(StageView::Management), "/vector-db/management");
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Stage::VectorEmbed).unwrap();
        assert_eq!(json, "\"vector-embed\"");
    }
}
