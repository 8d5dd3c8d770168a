use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    OriginalPrice,
    Image,
    Category,
    Tags,
    InStock,
    Featured,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial catalog. Prices are decimal strings, tags a JSON array stored as text.
const SEED_PRODUCTS: &[(&str, &str, &str, Option<&str>, &str, &str, &str, bool)] = &[
    (
        "Kawaii Cat Squishy",
        "Adorable cat-shaped stress relief toy with big eyes and soft texture",
        "12.99",
        Some("16.99"),
        "https://images.unsplash.com/photo-1545249390-6bdfa286032f?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "kawaii",
        r#"["cat","kawaii","stress-relief"]"#,
        true,
    ),
    (
        "Stress Relief Ball",
        "Perfect for hand exercise and stress relief therapy",
        "8.99",
        Some("11.99"),
        "https://images.unsplash.com/photo-1612198188060-c7c2a3b66eae?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "stress-relief",
        r#"["stress-relief","therapy","exercise"]"#,
        true,
    ),
    (
        "Slow Rise Panda",
        "Super soft slow-rising panda squishy with authentic scent",
        "15.99",
        None,
        "https://images.unsplash.com/photo-1564349683136-77e08dba1ef7?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "kawaii",
        r#"["panda","slow-rise","scented"]"#,
        true,
    ),
    (
        "Magic Unicorn",
        "Sparkly unicorn with rainbow mane and glittery finish",
        "18.99",
        None,
        "https://images.unsplash.com/photo-1587654780291-39c9404d746b?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "kawaii",
        r#"["unicorn","rainbow","sparkly"]"#,
        true,
    ),
    (
        "Pop It Fidget",
        "Satisfying bubble popping experience for focus and relaxation",
        "6.99",
        None,
        "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "fidget",
        r#"["pop-it","fidget","focus"]"#,
        false,
    ),
    (
        "Sweet Donut",
        "Delicious-looking donut squishy with realistic frosting texture",
        "9.99",
        None,
        "https://images.unsplash.com/photo-1551024506-0bccd828d307?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "food",
        r#"["donut","sweet","realistic"]"#,
        false,
    ),
    (
        "Therapy Putty",
        "Professional-grade stress relief putty for hand strengthening",
        "14.99",
        None,
        "https://images.unsplash.com/photo-1578662996442-48f60103fc96?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "therapy",
        r#"["therapy","professional","strengthening"]"#,
        false,
    ),
    (
        "Mini Collection Set",
        "Set of 6 mini squishy characters in various designs",
        "24.99",
        Some("35.99"),
        "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=600",
        "sets",
        r#"["mini","collection","variety"]"#,
        true,
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Products::Description).text().not_null())
                    .col(ColumnDef::new(Products::Price).string_len(20).not_null())
                    .col(ColumnDef::new(Products::OriginalPrice).string_len(20).null())
                    .col(ColumnDef::new(Products::Image).text().not_null())
                    .col(ColumnDef::new(Products::Category).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Products::Tags)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Products::InStock)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Products::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Products::Table).columns([
            Products::Name,
            Products::Description,
            Products::Price,
            Products::OriginalPrice,
            Products::Image,
            Products::Category,
            Products::Tags,
            Products::InStock,
            Products::Featured,
        ]);
        for (name, description, price, original_price, image, category, tags, featured) in
            SEED_PRODUCTS
        {
            insert
                .values([
                    (*name).into(),
                    (*description).into(),
                    (*price).into(),
                    original_price.map(str::to_string).into(),
                    (*image).into(),
                    (*category).into(),
                    (*tags).into(),
                    true.into(),
                    (*featured).into(),
                ])
                .map_err(|e| DbErr::Custom(format!("invalid product seed row: {e}")))?;
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Products::Table).to_owned())
            .await?;
        Ok(())
    }
}
