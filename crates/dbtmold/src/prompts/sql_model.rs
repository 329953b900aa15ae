//! `sql-model`: instructions for an incremental dbt SQL model.

use super::builder::InstructionBuilder;
use super::{PromptArgument, PromptKind, PromptTemplate, or_default, require};
use crate::artifacts::ArtifactId;
use crate::error::PromptError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUSINESS_LOGIC: &str = "Không có yêu cầu đặc biệt";

const PREAMBLE: &str =
    "Bạn là chuyên gia DBT và SQL. Hãy tạo ra một file SQL DBT model với các yêu cầu sau:";

const GUIDELINES: &[&str] = &[
    "Sử dụng cấu trúc config tương tự như template với materialized='incremental'",
    "Sử dụng incremental_strategy='insert_overwrite' và partition_by=['data_date']",
    "Thêm các cột kỹ thuật: tf_sourcing_at, tf_etl_at, data_date",
    "Sử dụng source() macro để tham chiếu đến bảng nguồn",
    "Áp dụng các điều kiện filter phù hợp",
    "Thực hiện JOIN nếu cần thiết",
    "Đảm bảo cú pháp SQL đúng chuẩn DBT",
];

const CLOSING: &str = "Hãy tạo ra file SQL hoàn chỉnh theo format trên.";

/// Parameters for a SQL model prompt.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SqlModelParams {
    /// Name of the target table/model.
    pub table_name: String,
    /// Business description of the table.
    pub description: String,
    /// Source tables, comma-separated.
    pub source_tables: String,
    /// Additional business logic requirements.
    pub business_logic: Option<String>,
}

impl PromptTemplate for SqlModelParams {
    const KIND: PromptKind = PromptKind::SqlModel;
    const DESCRIPTION: &'static str =
        "Generate a prompt for creating a dbt SQL model based on the reference template.";
    const ARGUMENTS: &'static [PromptArgument] = &[
        PromptArgument {
            name: "table_name",
            description: "Name of the target table/model",
            required: true,
        },
        PromptArgument {
            name: "description",
            description: "Business description of the table",
            required: true,
        },
        PromptArgument {
            name: "source_tables",
            description: "Source tables (comma-separated)",
            required: true,
        },
        PromptArgument {
            name: "business_logic",
            description: "Additional business logic requirements",
            required: false,
        },
    ];

    fn validate(&self) -> Result<(), PromptError> {
        require(Self::KIND, "table_name", &self.table_name)?;
        require(Self::KIND, "description", &self.description)?;
        require(Self::KIND, "source_tables", &self.source_tables)
    }

    fn render(&self, reference: &str) -> String {
        InstructionBuilder::new(PREAMBLE)
            .bullets(
                "Yêu cầu",
                &[
                    ("Tên bảng/model", self.table_name.trim()),
                    ("Mô tả", self.description.trim()),
                    ("Bảng nguồn", self.source_tables.trim()),
                    (
                        "Logic nghiệp vụ bổ sung",
                        or_default(&self.business_logic, DEFAULT_BUSINESS_LOGIC),
                    ),
                ],
            )
            .fenced(
                "Template tham khảo",
                ArtifactId::SqlModel.fence_language(),
                reference,
            )
            .numbered("Hướng dẫn", GUIDELINES)
            .closing(CLOSING)
            .build()
    }
}
