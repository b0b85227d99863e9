//! Static sample records standing in for a backend.
//!
//! Every call returns fresh owned copies so callers can mutate freely.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    AttendanceStatus, Attendee, BusinessListing, Contact, Coupon, DiscountType, Event,
    EventCategory, EventStatus, Order, OrderCoupon, OrderItem, OrderStatus, TicketCategory,
    TicketSchedule, Timezone,
};

/// Event used throughout the creator dashboard samples.
pub const DASHBOARD_EVENT_ID: i64 = 101;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    date(y, m, d)
        .and_hms_opt(h, min, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn ticket(
    id: &str,
    name: &str,
    price: i64,
    max_quantity: u32,
    tickets_purchased: u32,
    description: Option<&str>,
) -> TicketCategory {
    TicketCategory {
        id: id.to_string(),
        name: name.to_string(),
        price,
        max_quantity,
        tickets_purchased,
        description: description.map(str::to_string),
        schedule: TicketSchedule::FollowEvent,
    }
}

fn contact(name: &str, phone: &str, email: &str) -> Option<Contact> {
    Some(Contact {
        name: name.to_string(),
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
    })
}

pub fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: 1,
            category: EventCategory::Consumer,
            name: "Local Soundscape: Indie Music Night".into(),
            slug: Some("local-soundscape-depok".into()),
            location: "Rooftop ITC Depok".into(),
            address: "Jl. Margonda Raya No.56, Depok, Kec. Pancoran Mas, Kota Depok, Jawa Barat 16431".into(),
            summary: Some("Konser musik indie dengan suasana rooftop dan pemandangan kota.".into()),
            full_description: "Nikmati malam penuh alunan musik indie dari band-band lokal berbakat di Depok. Suasana rooftop yang cozy dengan city view menawan.".into(),
            ticket_categories: vec![
                ticket("regular", "Regular", 75_000, 200, 25, Some("Akses masuk reguler.")),
                ticket("vip", "VIP", 150_000, 50, 48, Some("Akses VIP, free drink, dan merchandise.")),
            ],
            status: EventStatus::Active,
            display_price: "Rp 75.000".into(),
            date_display: "2025/06/28 - 2025/06/29".into(),
            time_display: "15:00 - 22:00".into(),
            timezone: Some(Timezone::Wib),
            theme: "Konser Musik".into(),
            organizer_name: Some("Kolektif Musik Depok".into()),
            terms_and_conditions: Some("Dilarang membawa makanan dan minuman dari luar. Tiket yang sudah dibeli tidak dapat dikembalikan.".into()),
            parking_available: Some(true),
            age_restriction: Some("18+".into()),
            arrival_info: Some("Pintu masuk dari Lobby Utara ITC Depok, naik lift ke lantai paling atas.".into()),
            contact: contact("Panitia Soundscape", "081200001111", "info@localsound.id"),
        },
        Event {
            id: 2,
            category: EventCategory::Business,
            name: "Creator Connect 2025".into(),
            slug: Some("creator-connect-2025".into()),
            location: "Margo City Depok".into(),
            address: "Jl. Margonda Raya No.358, Kemiri Muka, Kecamatan Beji, Kota Depok, Jawa Barat 16423".into(),
            summary: Some("Konferensi networking dan workshop untuk content creator & influencer.".into()),
            full_description: "Konferensi tahunan untuk para content creator, influencer, dan agensi. Sesi networking, workshop, dan diskusi panel.".into(),
            ticket_categories: vec![
                ticket("early-bird-creator", "Early Bird Creator Pass", 200_000, 100, 100, Some("Akses semua sesi, berlaku hingga 30 Juni.")),
                TicketCategory {
                    schedule: TicketSchedule::Custom {
                        start_date: date(2025, 7, 1),
                        end_date: Some(date(2025, 7, 19)),
                        start_time: "08:00".into(),
                        end_time: Some("18:00".into()),
                        timezone: Timezone::Wib,
                    },
                    ..ticket("creator-pass", "Creator Pass", 250_000, 300, 5, Some("Akses semua sesi konferensi."))
                },
                ticket("business-pass", "Business Pass", 500_000, 150, 0, Some("Akses semua sesi + area networking B2B.")),
            ],
            status: EventStatus::Active,
            display_price: "Mulai Rp 250.000".into(),
            date_display: "2025/07/19".into(),
            time_display: "09:00 - 17:00".into(),
            timezone: Some(Timezone::Wib),
            theme: "Konferensi & Workshop".into(),
            organizer_name: Some("Hegira Event Management".into()),
            terms_and_conditions: None,
            parking_available: Some(true),
            age_restriction: Some("17+".into()),
            arrival_info: Some("Registrasi di Main Atrium Margo City, lantai dasar.".into()),
            contact: contact("Tim Hegira Events", "081211112222", "events@hegira.com"),
        },
        Event {
            id: 3,
            category: EventCategory::Government,
            name: "Forum Digitalisasi UMKM Nasional".into(),
            slug: Some("forum-umkm-digital-2025".into()),
            location: "Hotel Indonesia Kempinski, Jakarta".into(),
            address: "Jl. M.H. Thamrin No.1, Menteng, Kota Jakarta Pusat 10310".into(),
            summary: Some("Forum pemerintah & UMKM untuk akselerasi transformasi digital.".into()),
            full_description: "Forum strategis yang mempertemukan perwakilan pemerintah, pelaku UMKM, dan penyedia teknologi.".into(),
            ticket_categories: vec![
                ticket("umkm-delegate", "Delegasi UMKM", 0, 500, 120, Some("Gratis untuk UMKM terpilih (perlu registrasi & seleksi).")),
                ticket("gov-delegate", "Delegasi Pemerintah", 0, 200, 50, Some("Khusus perwakilan instansi pemerintah.")),
                ticket("tech-provider", "Penyedia Teknologi/Umum", 750_000, 100, 30, Some("Akses ke semua sesi dan area pameran.")),
            ],
            status: EventStatus::Draft,
            display_price: "Gratis / Rp 750.000".into(),
            date_display: "2025/08/25 - 2025/08/26".into(),
            time_display: "08:30 - 17:00".into(),
            timezone: Some(Timezone::Wib),
            theme: "Forum & Pameran".into(),
            organizer_name: Some("Kementerian Koperasi dan UKM & Hegira".into()),
            terms_and_conditions: None,
            parking_available: None,
            age_restriction: None,
            arrival_info: None,
            contact: contact("Sekretariat Forum", "0215550011", "info@forumumkm.go.id"),
        },
        Event {
            id: 4,
            category: EventCategory::Consumer,
            name: "Pameran Seni Kontemporer \"RuangRupa\"".into(),
            slug: Some("ruangrupa-art-exhibition".into()),
            location: "Galeri Nasional Indonesia, Jakarta".into(),
            address: "Jl. Medan Merdeka Tim. No.14, Gambir, Kota Jakarta Pusat 10110".into(),
            summary: Some("Pameran karya seni kontemporer dari seniman muda Indonesia.".into()),
            full_description: "Pameran seni rupa kontemporer yang menampilkan karya-karya terbaru dari seniman muda Indonesia.".into(),
            ticket_categories: vec![
                ticket("student-pass", "Pelajar/Mahasiswa", 25_000, 1000, 250, Some("Wajib menunjukkan kartu pelajar/mahasiswa aktif.")),
                ticket("general-admission", "Umum", 50_000, 2000, 500, Some("Tiket masuk reguler.")),
            ],
            status: EventStatus::Active,
            display_price: "Mulai Rp 25.000".into(),
            date_display: "2025/09/05 - 2025/09/15".into(),
            time_display: "10:00 - 19:00".into(),
            timezone: Some(Timezone::Wib),
            theme: "Pameran Seni".into(),
            organizer_name: Some("Komunitas Seniman Jakarta".into()),
            terms_and_conditions: None,
            parking_available: None,
            age_restriction: None,
            arrival_info: None,
            contact: contact("Kurator Pameran", "085678901234", "ruangrupa@artmail.com"),
        },
        Event {
            id: 14,
            category: EventCategory::Consumer,
            name: "Cita Rasa Nusantara Food Festival".into(),
            slug: Some("cita-rasa-nusantara-fest".into()),
            location: "Lapangan Banteng, Jakarta".into(),
            address: "Ps. Baru, Kecamatan Sawah Besar, Kota Jakarta Pusat".into(),
            summary: Some("Festival kuliner Nusantara dengan ratusan tenant dan demo masak.".into()),
            full_description: "Festival kuliner terbesar yang menyajikan kelezatan hidangan dari seluruh penjuru Nusantara.".into(),
            ticket_categories: vec![
                ticket("entry-voucher-50k", "Voucher Masuk + Kuliner Rp 50.000", 50_000, 5000, 1500, Some("Termasuk voucher makan senilai Rp 50.000.")),
                ticket("entry-voucher-100k", "Voucher Masuk + Kuliner Rp 100.000", 90_000, 3000, 800, Some("Termasuk voucher makan senilai Rp 100.000 (Hemat Rp 10.000).")),
            ],
            status: EventStatus::Active,
            display_price: "Mulai Rp 50.000".into(),
            date_display: "2025/09/20 - 2025/09/22".into(),
            time_display: "11:00 - 21:00".into(),
            timezone: Some(Timezone::Wib),
            theme: "Festival Kuliner".into(),
            organizer_name: Some("Hegira Culinary".into()),
            terms_and_conditions: None,
            parking_available: None,
            age_restriction: None,
            arrival_info: None,
            contact: contact("Tim Kuliner Hegira", "081233334444", "foodfest@hegira.com"),
        },
        Event {
            id: DASHBOARD_EVENT_ID,
            category: EventCategory::Consumer,
            name: "Jakarta Culinary Expo 2025".into(),
            slug: Some("jakarta-culinary-expo-2025".into()),
            location: "JIExpo Kemayoran".into(),
            address: "JIExpo Kemayoran, Jakarta Pusat".into(),
            summary: Some("Pameran kuliner akbar dengan chef internasional.".into()),
            full_description: "Pameran kuliner terbesar se-Asia Tenggara. Menampilkan chef ternama, workshop memasak, dan ratusan tenant makanan lezat.".into(),
            ticket_categories: vec![
                ticket("daily-pass-jce", "Daily Pass", 75_000, 1000, 10, None),
                ticket("3day-pass-jce", "3-Day Pass", 200_000, 500, 50, None),
            ],
            status: EventStatus::Active,
            display_price: "Rp 75.000".into(),
            date_display: "2025/11/01 - 2025/11/03".into(),
            time_display: "10:00 - 21:00".into(),
            timezone: Some(Timezone::Wib),
            theme: "Pameran Kuliner".into(),
            organizer_name: Some("Creator Hegira".into()),
            terms_and_conditions: Some("Dilarang membawa makanan dari luar. Voucher makanan tersedia.".into()),
            parking_available: Some(true),
            age_restriction: Some("Semua Umur".into()),
            arrival_info: Some("Gunakan pintu masuk Hall C.".into()),
            contact: contact("Creator Hegira", "+6281200005555", "info@jce.com"),
        },
        Event {
            id: 15,
            category: EventCategory::Consumer,
            name: "Hegira E-Champions Cup 2025".into(),
            slug: Some("hegira-echampions-cup-2025".into()),
            location: "Online & BritAma Arena, Jakarta".into(),
            address: "Jl. Raya Kelapa Nias, Kelapa Gading Tim., Jakarta Utara 14240".into(),
            summary: Some("Turnamen e-sport dengan kualifikasi online dan grand final offline.".into()),
            full_description: "Turnamen e-sport bergengsi yang mempertandingkan game-game populer.".into(),
            ticket_categories: vec![
                ticket("player-reg", "Registrasi Pemain (per tim)", 250_000, 128, 60, Some("Untuk tim yang ingin berpartisipasi.")),
                ticket("spectator-online", "Tiket Nonton Online (Kualifikasi)", 0, 10_000, 5000, Some("Gratis nonton babak kualifikasi via streaming.")),
                ticket("spectator-venue-gf", "Tiket Nonton Grand Final (Venue)", 100_000, 1000, 950, Some("Nonton langsung Grand Final di BritAma Arena.")),
            ],
            status: EventStatus::Finished,
            display_price: "Gratis / Mulai Rp 100.000".into(),
            date_display: "2025/12/01 - 2025/12/15".into(),
            time_display: "Sesuai Jadwal Pertandingan".into(),
            timezone: Some(Timezone::Wib),
            theme: "Turnamen E-Sport".into(),
            organizer_name: Some("Hegira Gaming Division".into()),
            terms_and_conditions: None,
            parking_available: None,
            age_restriction: None,
            arrival_info: None,
            contact: contact("Panitia E-Sport Hegira", "089988887777", "esports@hegira.com"),
        },
    ]
}

/// Coupons of the dashboard sample event.
pub fn sample_coupons() -> Vec<Coupon> {
    vec![
        Coupon {
            id: "KPN001".into(),
            name: "Diskon Awal".into(),
            code: "EARLYBIRD10".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            quantity: Some(50),
            resets_daily: false,
            start_date: Some(date(2025, 9, 1)),
            end_date: Some(date(2025, 10, 31)),
            minimum_purchase: None,
            applicable_ticket_ids: vec!["daily-pass-jce".into()],
        },
        Coupon {
            id: "KPN002".into(),
            name: "Potongan 3-Day Pass".into(),
            code: "HEMAT25K".into(),
            discount_type: DiscountType::Fixed,
            discount_value: 25_000,
            quantity: Some(20),
            resets_daily: true,
            start_date: None,
            end_date: None,
            minimum_purchase: None,
            applicable_ticket_ids: vec!["3day-pass-jce".into()],
        },
        Coupon {
            id: "KPN003".into(),
            name: "Flash Sale".into(),
            code: "FLASHJCE".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 25,
            quantity: Some(10),
            resets_daily: false,
            start_date: None,
            end_date: Some(date(2025, 12, 31)),
            minimum_purchase: None,
            applicable_ticket_ids: vec![],
        },
    ]
}

fn item(name: &str, quantity: u32, price: i64) -> OrderItem {
    OrderItem {
        ticket_name: name.to_string(),
        quantity,
        price_per_ticket: price,
    }
}

fn used(code: &str, name: &str) -> Option<OrderCoupon> {
    Some(OrderCoupon {
        code: code.to_string(),
        name: name.to_string(),
    })
}

pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "ORD-101001".into(),
            event_id: DASHBOARD_EVENT_ID,
            buyer_name: "Andi Pratama".into(),
            created_at: at(2025, 10, 1, 10, 0),
            status: OrderStatus::Success,
            items: vec![item("Daily Pass", 2, 75_000)],
            coupon: used("EARLYBIRD10", "Diskon Awal"),
        },
        Order {
            id: "ORD-101002".into(),
            event_id: DASHBOARD_EVENT_ID,
            buyer_name: "Siti Rahma".into(),
            created_at: at(2025, 10, 1, 14, 30),
            status: OrderStatus::Success,
            items: vec![item("3-Day Pass", 1, 200_000)],
            coupon: None,
        },
        Order {
            id: "ORD-101003".into(),
            event_id: DASHBOARD_EVENT_ID,
            buyer_name: "Rudi Hartono".into(),
            created_at: at(2025, 10, 2, 8, 45),
            status: OrderStatus::Pending,
            items: vec![item("Daily Pass", 1, 75_000)],
            coupon: None,
        },
        Order {
            id: "ORD-101004".into(),
            event_id: DASHBOARD_EVENT_ID,
            buyer_name: "Maya Lestari".into(),
            created_at: at(2025, 10, 3, 9, 15),
            status: OrderStatus::Success,
            items: vec![item("Daily Pass", 1, 75_000), item("3-Day Pass", 2, 200_000)],
            coupon: used("FLASHJCE", "Flash Sale"),
        },
        Order {
            id: "ORD-101005".into(),
            event_id: DASHBOARD_EVENT_ID,
            buyer_name: "Dedi Kurniawan".into(),
            created_at: at(2025, 10, 3, 12, 0),
            status: OrderStatus::Failed,
            items: vec![item("3-Day Pass", 1, 200_000)],
            coupon: used("FLASHJCE", "Flash Sale"),
        },
        Order {
            id: "ORD-101006".into(),
            event_id: DASHBOARD_EVENT_ID,
            buyer_name: "Lina Marlina".into(),
            created_at: at(2025, 10, 3, 19, 0),
            status: OrderStatus::Success,
            items: vec![item("Daily Pass", 3, 75_000)],
            coupon: used("EARLYBIRD10", "Diskon Awal"),
        },
        Order {
            id: "ORD-001001".into(),
            event_id: 1,
            buyer_name: "Bayu Saputra".into(),
            created_at: at(2025, 6, 20, 16, 0),
            status: OrderStatus::Success,
            items: vec![item("Regular", 2, 75_000)],
            coupon: None,
        },
    ]
}

fn attendee(ticket_id: &str, owner: &str, category: &str, arrived: Option<DateTime<Utc>>) -> Attendee {
    Attendee {
        ticket_id: ticket_id.to_string(),
        owner_name: owner.to_string(),
        ticket_category_name: category.to_string(),
        event_id: DASHBOARD_EVENT_ID,
        event_name: "Jakarta Culinary Expo 2025".into(),
        status: if arrived.is_some() {
            AttendanceStatus::Arrived
        } else {
            AttendanceStatus::NotArrived
        },
        scan_timestamp: arrived,
    }
}

pub fn sample_attendees() -> Vec<Attendee> {
    vec![
        attendee("HGR-JCE-0001", "Andi Pratama", "Daily Pass", None),
        attendee("HGR-JCE-0002", "Andi Pratama", "Daily Pass", None),
        attendee("HGR-JCE-0003", "Siti Rahma", "3-Day Pass", Some(at(2025, 11, 1, 10, 5))),
        attendee("HGR-JCE-0004", "Maya Lestari", "3-Day Pass", None),
        attendee("HGR-JCE-0005", "Lina Marlina", "Daily Pass", Some(at(2025, 11, 1, 11, 20))),
    ]
}

pub fn sample_business_listings() -> Vec<BusinessListing> {
    vec![
        BusinessListing {
            id: 1001,
            slug: Some("vendor-properti-event".into()),
            name: "Vendor Properti Event Terbaik".into(),
            sector: "Peralatan & Produksi Event".into(),
            location: "Jakarta & Sekitarnya".into(),
            budget: "Fleksibel, Mulai dari Rp 5 Juta".into(),
            match_score: 4.8,
            special_features: vec![
                "Kualitas Terjamin".into(),
                "Pengalaman Luas".into(),
                "Respon Cepat".into(),
            ],
            logo_url: None,
        },
        BusinessListing {
            id: 1002,
            slug: Some("brand-sponsorship-nasional".into()),
            name: "Brand Sponsorship Nasional".into(),
            sector: "Sponsor Korporat & Media".into(),
            location: "Seluruh Indonesia".into(),
            budget: "Mulai dari Rp 50 Juta per Event".into(),
            match_score: 4.5,
            special_features: vec![
                "Jangkauan Nasional".into(),
                "Citra Brand Kuat".into(),
                "Aktivasi Kreatif".into(),
            ],
            logo_url: None,
        },
        BusinessListing {
            id: 1003,
            slug: None,
            name: "Investor Ventura & Angel".into(),
            sector: "Investasi & Pendanaan Awal".into(),
            location: "Asia Tenggara".into(),
            budget: "Seed & Series A Funding".into(),
            match_score: 4.2,
            special_features: vec![
                "Pendanaan Strategis".into(),
                "Jaringan Luas".into(),
                "Mentorship".into(),
            ],
            logo_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_event_ids_are_unique() {
        let events = sample_events();
        let ids: HashSet<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn test_ticket_counters_are_consistent() {
        for event in sample_events() {
            assert!(!event.ticket_categories.is_empty());
            for tc in &event.ticket_categories {
                assert!(tc.max_quantity > 0, "{}", tc.id);
                assert!(tc.tickets_purchased <= tc.max_quantity, "{}", tc.id);
            }
        }
    }

    #[test]
    fn test_coupon_codes_are_normalized() {
        for coupon in sample_coupons() {
            assert_eq!(coupon.code, coupon.code.trim().to_uppercase());
            assert!(!coupon.code.contains(char::is_whitespace));
        }
    }

    #[test]
    fn test_sample_dates_are_valid() {
        assert!(sample_orders()
            .iter()
            .all(|o| o.created_at > DateTime::<Utc>::MIN_UTC));
    }
}
