use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog article. `is_active = false` rows are soft-deleted and must never
/// surface in any client-facing query.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub thumbnail: String,
    pub is_video: bool,
    #[sea_orm(nullable)]
    pub video_url: Option<String>,
    pub total_view: i32,
    pub is_active: bool,
    #[sea_orm(nullable)]
    pub posting_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tags_csv: Option<String>,
    #[sea_orm(nullable)]
    pub id_province: Option<i32>,
    #[sea_orm(nullable)]
    pub id_city: Option<i32>,
    #[sea_orm(nullable)]
    pub id_category: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::province::Entity",
        from = "Column::IdProvince",
        to = "super::province::Column::Id"
    )]
    Province,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::IdCity",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::IdCategory",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::article_content::Entity")]
    ArticleContent,
    #[sea_orm(has_many = "super::article_content_image::Entity")]
    ArticleContentImage,
}

impl Related<super::province::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Province.def()
    }
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::article_content::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleContent.def()
    }
}

impl Related<super::article_content_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArticleContentImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
