//! End-to-end marketplace flows over the in-memory store

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use marketplace::repository::{
    CardRepository, OpenTradeRepository, TradeFilter, UserRepository,
};
use marketplace::services::{
    CollectionService, CreateTradeRequest, PackService, TradeService, UserService,
};
use marketplace::{MemoryStore, ServiceError};
use trading_engine::TradeRejection;
use types::card::Card;
use types::collection::Collection;
use types::grade::Grade;
use types::ids::UserId;
use types::trade::TradeKind;
use types::user::User;
use types::vehicle::Vehicle;

struct Harness {
    store: Arc<MemoryStore>,
    users: UserService,
    trades: TradeService,
    packs: PackService,
    collections: CollectionService,
}

fn make_harness() -> Harness {
    let store = MemoryStore::new();
    Harness {
        users: UserService::new(store.clone(), store.clone(), store.clone()),
        trades: TradeService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        ),
        packs: PackService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        ),
        collections: CollectionService::new(store.clone(), store.clone()),
        store,
    }
}

async fn seed_collection(store: &Arc<MemoryStore>, vehicle_count: usize) -> Collection {
    let mut collection = Collection::new("JDM Legends", "", 500, vec![]);
    for i in 0..vehicle_count {
        let vehicle = Vehicle::new(
            "1999",
            "Nissan",
            format!("Skyline #{i}"),
            90,
            85,
            80,
            1_000,
            "",
        );
        collection.add_vehicle(vehicle.id);
        marketplace::repository::VehicleRepository::insert(&**store, vehicle).await;
    }
    marketplace::repository::CollectionRepository::insert(&**store, collection.clone()).await;
    collection
}

async fn seed_card(store: &Arc<MemoryStore>, owner: &mut User, value: i64) -> Card {
    let card = Card::new(
        owner.id,
        types::ids::VehicleId::new(),
        types::ids::CollectionId::new(),
        Grade::Factory,
        value,
    );
    owner.add_card(card.id);
    CardRepository::insert(&**store, card.clone()).await;
    UserRepository::update(&**store, owner.clone()).await;
    card
}

#[tokio::test]
async fn for_price_trade_settles_currency_and_ownership() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;
    let buyer = h.users.register("buyer", "hash").await;
    h.users.grant_currency(buyer.id, 1_000).await.unwrap();

    let card = seed_card(&h.store, &mut seller, 100).await;
    let trade = h
        .trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForPrice,
                card_id: card.id,
                price: Some(300),
                want_card_id: None,
            },
        )
        .await
        .unwrap();

    let settlement = h.trades.accept_trade(buyer.id, trade.id, None).await.unwrap();

    // Record fields
    assert_eq!(settlement.completed.seller_id, seller.id);
    assert_eq!(settlement.completed.buyer_id, buyer.id);
    assert_eq!(settlement.completed.price, 300);
    assert_eq!(settlement.completed.buyer_card_id, None);

    // Currency moved, total conserved
    let seller_after = h.users.get(seller.id).await.unwrap();
    let buyer_after = h.users.get(buyer.id).await.unwrap();
    assert_eq!(seller_after.currency, 300);
    assert_eq!(buyer_after.currency, 700);

    // Card changed hands, both relationally and in the lists
    let card_after = CardRepository::get(&*h.store, card.id).await.unwrap();
    assert_eq!(card_after.owner_id, buyer.id);
    assert!(!seller_after.has_card(card.id));
    assert!(buyer_after.has_card(card.id));

    // Offer consumed; record queryable; history updated
    assert!(OpenTradeRepository::get(&*h.store, trade.id).await.is_none());
    assert!(h.trades.completed_trade(settlement.completed.id).await.is_ok());
    assert_eq!(seller_after.trade_history, vec![settlement.completed.id]);

    // Rewards granted settled
    assert!(settlement.seller_reward.is_claimed());
    assert_eq!(settlement.seller_reward.amount, 300);
    assert_eq!(
        settlement.buyer_reward.item_id,
        Some(*card.id.as_uuid())
    );
}

#[tokio::test]
async fn for_card_trade_swaps_both_cards() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;
    let mut buyer = h.users.register("buyer", "hash").await;

    let seller_card = seed_card(&h.store, &mut seller, 100).await;
    let buyer_card = seed_card(&h.store, &mut buyer, 110).await;

    let trade = h
        .trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForCard,
                card_id: seller_card.id,
                price: None,
                want_card_id: Some(buyer_card.id),
            },
        )
        .await
        .unwrap();

    let settlement = h
        .trades
        .accept_trade(buyer.id, trade.id, Some(buyer_card.id))
        .await
        .unwrap();
    assert_eq!(settlement.completed.buyer_card_id, Some(buyer_card.id));

    let seller_card_after = CardRepository::get(&*h.store, seller_card.id).await.unwrap();
    let buyer_card_after = CardRepository::get(&*h.store, buyer_card.id).await.unwrap();
    assert_eq!(seller_card_after.owner_id, buyer.id);
    assert_eq!(buyer_card_after.owner_id, seller.id);

    let seller_after = h.users.get(seller.id).await.unwrap();
    let buyer_after = h.users.get(buyer.id).await.unwrap();
    assert!(seller_after.has_card(buyer_card.id));
    assert!(buyer_after.has_card(seller_card.id));
    assert!(!seller_after.has_card(seller_card.id));
    assert!(!buyer_after.has_card(buyer_card.id));
}

#[tokio::test]
async fn underfunded_buyer_changes_nothing() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;
    let buyer = h.users.register("buyer", "hash").await;
    h.users.grant_currency(buyer.id, 100).await.unwrap();

    let card = seed_card(&h.store, &mut seller, 100).await;
    let trade = h
        .trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForPrice,
                card_id: card.id,
                price: Some(300),
                want_card_id: None,
            },
        )
        .await
        .unwrap();

    let err = h.trades.accept_trade(buyer.id, trade.id, None).await.unwrap_err();
    assert_eq!(err, ServiceError::Rejected(TradeRejection::InsufficientFunds));

    // Offer still open, card still the seller's, currency untouched
    assert!(OpenTradeRepository::get(&*h.store, trade.id).await.is_some());
    let card_after = CardRepository::get(&*h.store, card.id).await.unwrap();
    assert_eq!(card_after.owner_id, seller.id);
    assert_eq!(h.users.get(buyer.id).await.unwrap().currency, 100);
}

#[tokio::test]
async fn accepted_trade_cannot_settle_twice() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;
    let buyer = h.users.register("buyer", "hash").await;
    let rival = h.users.register("rival", "hash").await;
    h.users.grant_currency(buyer.id, 1_000).await.unwrap();
    h.users.grant_currency(rival.id, 1_000).await.unwrap();

    let card = seed_card(&h.store, &mut seller, 100).await;
    let trade = h
        .trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForPrice,
                card_id: card.id,
                price: Some(300),
                want_card_id: None,
            },
        )
        .await
        .unwrap();

    h.trades.accept_trade(buyer.id, trade.id, None).await.unwrap();

    // The offer is gone; a second accept cannot settle again
    let err = h.trades.accept_trade(rival.id, trade.id, None).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    assert_eq!(h.users.get(rival.id).await.unwrap().currency, 1_000);
}

#[tokio::test]
async fn self_trade_and_foreign_cancel_rejected() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;
    let stranger = h.users.register("stranger", "hash").await;

    let card = seed_card(&h.store, &mut seller, 100).await;
    let trade = h
        .trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForPrice,
                card_id: card.id,
                price: Some(300),
                want_card_id: None,
            },
        )
        .await
        .unwrap();

    let err = h.trades.accept_trade(seller.id, trade.id, None).await.unwrap_err();
    assert_eq!(err, ServiceError::SelfTrade);

    let err = h.trades.cancel_trade(stranger.id, trade.id).await.unwrap_err();
    assert_eq!(err, ServiceError::NotOwner("trade"));

    h.trades.cancel_trade(seller.id, trade.id).await.unwrap();
    assert!(OpenTradeRepository::get(&*h.store, trade.id).await.is_none());
}

#[tokio::test]
async fn listing_filters_by_kind_and_price() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;

    let cheap = seed_card(&h.store, &mut seller, 50).await;
    let dear = seed_card(&h.store, &mut seller, 500).await;
    let swap = seed_card(&h.store, &mut seller, 100).await;
    let wanted = seed_card(&h.store, &mut seller, 100).await;

    for (card, price) in [(cheap.id, 50), (dear.id, 500)] {
        h.trades
            .create_trade(
                seller.id,
                CreateTradeRequest {
                    kind: TradeKind::ForPrice,
                    card_id: card,
                    price: Some(price),
                    want_card_id: None,
                },
            )
            .await
            .unwrap();
    }
    h.trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForCard,
                card_id: swap.id,
                price: None,
                want_card_id: Some(wanted.id),
            },
        )
        .await
        .unwrap();

    let page = h
        .trades
        .list_open_trades(&TradeFilter {
            kind: Some(TradeKind::ForPrice),
            min_price: Some(100),
            ..TradeFilter::default()
        })
        .await;
    assert_eq!(page.total, 1);
    assert_eq!(page.trades[0].card_id, dear.id);

    let card_trades = h
        .trades
        .list_open_trades(&TradeFilter {
            kind: Some(TradeKind::ForCard),
            ..TradeFilter::default()
        })
        .await;
    assert_eq!(card_trades.total, 1);
    assert_eq!(card_trades.trades[0].want_card_id, Some(wanted.id));
}

#[tokio::test]
async fn pack_purchase_and_open_mints_collection_cards() {
    let h = make_harness();
    let user = h.users.register("collector", "hash").await;
    h.users.grant_currency(user.id, 2_000).await.unwrap();
    let collection = seed_collection(&h.store, 3).await;

    let pack = h.packs.purchase_pack(user.id, collection.id).await.unwrap();
    assert_eq!(pack.value, 500);
    assert_eq!(h.users.get(user.id).await.unwrap().currency, 1_500);

    // Preview shows the collection's vehicles before opening
    let preview = h.packs.preview(pack.id).await.unwrap();
    assert_eq!(preview.len(), 3);

    let mut rng = StdRng::seed_from_u64(42);
    let minted = h.packs.open_pack(user.id, pack.id, &mut rng).await.unwrap();
    assert_eq!(minted.len(), 5);

    let user_after = h.users.get(user.id).await.unwrap();
    assert!(user_after.owned_packs.is_empty());
    assert_eq!(user_after.owned_cards.len(), 5);

    for card in &minted {
        assert!(collection.has_vehicle(card.vehicle_id));
        assert_eq!(card.collection_id, collection.id);
        let expected = match card.grade {
            Grade::Factory => 100,
            Grade::LimitedRun => 150,
            Grade::Nismo => 300,
        };
        assert_eq!(card.value, expected);
    }

    // A second open fails; the pack is consumed
    let err = h
        .packs
        .open_pack(user.id, pack.id, &mut rng)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    // Garage joins every card with its vehicle
    let garage = h.users.garage(user.id).await.unwrap();
    assert_eq!(garage.len(), 5);

    // Progress counts distinct vehicles only
    let progress = h.collections.progress(user.id).await;
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].total_vehicles, 3);
    assert!(progress[0].owned_vehicles >= 1 && progress[0].owned_vehicles <= 3);
    assert_eq!(
        progress[0].percent,
        (progress[0].owned_vehicles * 100 / 3) as u32
    );
}

#[tokio::test]
async fn pack_purchase_requires_funds_and_ownership() {
    let h = make_harness();
    let poor = h.users.register("poor", "hash").await;
    let rich = h.users.register("rich", "hash").await;
    h.users.grant_currency(rich.id, 1_000).await.unwrap();
    let collection = seed_collection(&h.store, 2).await;

    let err = h.packs.purchase_pack(poor.id, collection.id).await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Domain(types::errors::DomainError::InsufficientCurrency)
    );

    let pack = h.packs.purchase_pack(rich.id, collection.id).await.unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let err = h
        .packs
        .open_pack(poor.id, pack.id, &mut rng)
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::NotOwner("pack"));
}

#[tokio::test]
async fn unknown_user_cannot_accept() {
    let h = make_harness();
    let mut seller = h.users.register("seller", "hash").await;
    let card = seed_card(&h.store, &mut seller, 100).await;
    let trade = h
        .trades
        .create_trade(
            seller.id,
            CreateTradeRequest {
                kind: TradeKind::ForPrice,
                card_id: card.id,
                price: Some(100),
                want_card_id: None,
            },
        )
        .await
        .unwrap();

    let err = h
        .trades
        .accept_trade(UserId::new(), trade.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "user", .. }));
}
