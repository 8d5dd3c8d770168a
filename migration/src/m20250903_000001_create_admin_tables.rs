use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Sales {
    Table,
    Id,
    Customer,
    Item,
    Qty,
    PricePaid,
    PickupDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reservations {
    Table,
    Id,
    Customer,
    Item,
    PricePaid,
    Qty,
    DateSold,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    OrderGroup,
    ItemType,
    Item,
    RetailPrice,
    ResellPrice,
    Stock,
    Status,
    Track,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AdminUsers {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// customer, item, qty, price paid, pickup date, notes
const SEED_SALES: &[(&str, &str, i32, &str, &str, &str)] = &[
    ("Shelby", "SISI", 1, "50.00", "6/14/2025", "trading opened sisi for Dada"),
    ("Regina", "SISI", 1, "50.00", "6/14/2025", ""),
    ("Andrew", "BABA", 1, "50.00", "6/14/2025", ""),
    ("Meaghan", "QUQU", 1, "50.00", "6/14/2025", ""),
    ("SaroSH", "SEA SALT COCONUT", 1, "60.00", "6/14/2025", ""),
    ("Liam", "TOFFEE", 1, "30.00", "6/14/2025", ""),
];

/// customer, item, price paid, qty, date sold, notes
const SEED_RESERVATIONS: &[(&str, &str, &str, i32, &str, &str)] = &[
    ("Shelby", "SISI", "50.00", 1, "mm/yyyy", "trading Sisi for their Dada"),
    ("Regina", "SISI", "50.00", 1, "mm/yyyy", ""),
    ("Andrew", "BABA", "50.00", 1, "mm/yyyy", ""),
    ("Meaghan", "QUQU", "50.00", 1, "mm/yyyy", ""),
    ("SaroSH", "SEA SALT COCONUT", "60.00", 1, "mm/yyyy", ""),
    ("Liam", "TOFFEE", "50.00", 1, "mm/yyyy", ""),
];

/// order, type, item, retail, resell, stock, status, track, notes
#[allow(clippy::type_complexity)]
const SEED_INVENTORY: &[(&str, &str, &str, &str, &str, i32, &str, &str, &str)] = &[
    ("N/A", "MAC", "SEA SALT COCONUT", "30.00", "60.00", 1, "Shipping", "PARCEL", ""),
    ("GROUP 2", "MAC", "GREEN GRAPE", "30.00", "60.00", 1, "Shipping", "PARCEL 2", ""),
    ("GROUP 1", "MAC", "TOFFEE", "30.00", "60.00", 1, "Shipping", "PARCEL 1", ""),
    ("", "MAC", "LYCHEE BERRY", "30.00", "60.00", 0, "Sold out", "", ""),
    ("", "MAC", "SESAME BEAN", "30.00", "60.00", 0, "Sold out", "", ""),
    ("", "MAC", "SOYMILK", "30.00", "60.00", 0, "Sold out", "", ""),
    ("GROUP 1", "HAS", "ZIZI", "30.00", "60.00", 1, "Shipping", "PARCEL 1", ""),
    ("GROUP 1", "HAS", "BABA", "30.00", "50.00", 1, "Shipping", "PARCEL 1", ""),
    ("GROUP 3", "HAS", "QUQU", "30.00", "60.00", 1, "Shipping", "PARCEL 3", ""),
    ("GROUP 3", "HAS", "SISI", "30.00", "50.00", 1, "Shipping", "PARCEL 3", ""),
    (
        "GROUP 3",
        "HAS",
        "SISI",
        "30.00",
        "60.00",
        1,
        "Shipping",
        "PARCEL 3",
        "x1 Sisi has been fully opened and taken out of the box",
    ),
    ("", "HAS", "DADA", "30.00", "50.00", 0, "Sold out", "", ""),
];

fn timestamps<T: IntoIden>(created_at: T, updated_at: T) -> [ColumnDef; 2] {
    [
        ColumnDef::new(created_at)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .to_owned(),
        ColumnDef::new(updated_at)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .to_owned(),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let [created, updated] = timestamps(Sales::CreatedAt, Sales::UpdatedAt);
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::Customer).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Item).string_len(100).not_null())
                    .col(ColumnDef::new(Sales::Qty).integer().not_null())
                    .col(ColumnDef::new(Sales::PricePaid).string_len(20).not_null())
                    .col(ColumnDef::new(Sales::PickupDate).string_len(20).null())
                    .col(ColumnDef::new(Sales::Notes).text().null())
                    .col(created)
                    .col(updated)
                    .to_owned(),
            )
            .await?;

        let [created, updated] = timestamps(Reservations::CreatedAt, Reservations::UpdatedAt);
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Customer)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::Item).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Reservations::PricePaid)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::Qty).integer().not_null())
                    .col(ColumnDef::new(Reservations::DateSold).string_len(20).null())
                    .col(ColumnDef::new(Reservations::Notes).text().null())
                    .col(created)
                    .col(updated)
                    .to_owned(),
            )
            .await?;

        let [created, updated] = timestamps(Inventory::CreatedAt, Inventory::UpdatedAt);
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inventory::OrderGroup).string_len(50).null())
                    .col(ColumnDef::new(Inventory::ItemType).string_len(50).null())
                    .col(ColumnDef::new(Inventory::Item).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Inventory::RetailPrice)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inventory::ResellPrice)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inventory::Stock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Inventory::Status)
                            .string_len(50)
                            .not_null()
                            .default("Available"),
                    )
                    .col(ColumnDef::new(Inventory::Track).string_len(100).null())
                    .col(ColumnDef::new(Inventory::Notes).text().null())
                    .col(created)
                    .col(updated)
                    .to_owned(),
            )
            .await?;

        let [created, updated] = timestamps(AdminUsers::CreatedAt, AdminUsers::UpdatedAt);
        manager
            .create_table(
                Table::create()
                    .table(AdminUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminUsers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::Email)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::Role)
                            .string_len(20)
                            .not_null()
                            .default("admin"),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AdminUsers::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created)
                    .col(updated)
                    .to_owned(),
            )
            .await?;

        // spreadsheet rows the shop started from
        let mut sales = Query::insert();
        sales.into_table(Sales::Table).columns([
            Sales::Customer,
            Sales::Item,
            Sales::Qty,
            Sales::PricePaid,
            Sales::PickupDate,
            Sales::Notes,
        ]);
        for (customer, item, qty, price, pickup, notes) in SEED_SALES {
            sales
                .values([
                    (*customer).into(),
                    (*item).into(),
                    (*qty).into(),
                    (*price).into(),
                    (*pickup).into(),
                    (*notes).into(),
                ])
                .map_err(|e| DbErr::Custom(format!("invalid sales seed row: {e}")))?;
        }
        manager.exec_stmt(sales).await?;

        let mut reservations = Query::insert();
        reservations.into_table(Reservations::Table).columns([
            Reservations::Customer,
            Reservations::Item,
            Reservations::PricePaid,
            Reservations::Qty,
            Reservations::DateSold,
            Reservations::Notes,
        ]);
        for (customer, item, price, qty, date_sold, notes) in SEED_RESERVATIONS {
            reservations
                .values([
                    (*customer).into(),
                    (*item).into(),
                    (*price).into(),
                    (*qty).into(),
                    (*date_sold).into(),
                    (*notes).into(),
                ])
                .map_err(|e| DbErr::Custom(format!("invalid reservations seed row: {e}")))?;
        }
        manager.exec_stmt(reservations).await?;

        let mut inventory = Query::insert();
        inventory.into_table(Inventory::Table).columns([
            Inventory::OrderGroup,
            Inventory::ItemType,
            Inventory::Item,
            Inventory::RetailPrice,
            Inventory::ResellPrice,
            Inventory::Stock,
            Inventory::Status,
            Inventory::Track,
            Inventory::Notes,
        ]);
        for (order, item_type, item, retail, resell, stock, status, track, notes) in SEED_INVENTORY
        {
            inventory
                .values([
                    (*order).into(),
                    (*item_type).into(),
                    (*item).into(),
                    (*retail).into(),
                    (*resell).into(),
                    (*stock).into(),
                    (*status).into(),
                    (*track).into(),
                    (*notes).into(),
                ])
                .map_err(|e| DbErr::Custom(format!("invalid inventory seed row: {e}")))?;
        }
        manager.exec_stmt(inventory).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(AdminUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Inventory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Sales::Table).to_owned())
            .await?;
        Ok(())
    }
}
