//! 内置 CRM 规则表
//!
//! 源应用的默认标签集合：每条规则携带法语与英语两种源表述
//! （源应用默认渲染本身是双语的），译文列覆盖 `en` 与 `nl`。
//! 行序即求值序——复合短语必须排在其包含的较窄短语之前，
//! 调整顺序会改变语义。
//!
//! 这是一份经过修订的默认配置；集成方可通过 [`crate::rules::loader`]
//! 整表替换。

use super::{Lang, RuleTable, TranslationRule};

type Row = (
    &'static [&'static str],
    &'static [(Lang, &'static str)],
);

/// CRM 标签规则，声明顺序即求值顺序
const CRM_RULES: &[Row] = &[
    // 复合短语（先于其组成部分）
    (
        &["Factures en attente de paiement", "Invoices Awaiting Payment"],
        &[
            (Lang::En, "Invoices awaiting payment"),
            (Lang::Nl, "Facturen in afwachting van betaling"),
        ],
    ),
    (
        &["Factures impayées", "Unpaid invoices"],
        &[(Lang::En, "Unpaid invoices"), (Lang::Nl, "Onbetaalde facturen")],
    ),
    (
        &["Factures fournisseurs", "Supplier invoices"],
        &[
            (Lang::En, "Supplier invoices"),
            (Lang::Nl, "Leveranciersfacturen"),
        ],
    ),
    (
        &["Devis en attente de validation", "Proposals awaiting validation"],
        &[
            (Lang::En, "Proposals awaiting validation"),
            (Lang::Nl, "Offertes in afwachting van validatie"),
        ],
    ),
    (
        &["Commandes clients", "Customer orders"],
        &[(Lang::En, "Customer orders"), (Lang::Nl, "Klantorders")],
    ),
    (
        &["Nouveau tiers", "New third party"],
        &[(Lang::En, "New third party"), (Lang::Nl, "Nieuwe derde")],
    ),
    (
        &["Propositions commerciales", "Commercial proposals"],
        &[(Lang::En, "Commercial proposals"), (Lang::Nl, "Offertes")],
    ),
    (
        &["En attente de paiement", "Awaiting payment"],
        &[
            (Lang::En, "Awaiting payment"),
            (Lang::Nl, "In afwachting van betaling"),
        ],
    ),
    (
        &["En attente", "Awaiting"],
        &[(Lang::En, "Awaiting"), (Lang::Nl, "In afwachting")],
    ),
    (
        &["Impayées", "Unpaid"],
        &[(Lang::En, "Unpaid"), (Lang::Nl, "Onbetaald")],
    ),
    // 单一标签
    (
        &["Tableau de bord", "Dashboard"],
        &[(Lang::En, "Dashboard"), (Lang::Nl, "Dashboard")],
    ),
    (
        &["Tiers", "Third parties"],
        &[(Lang::En, "Third parties"), (Lang::Nl, "Derden")],
    ),
    (
        &["Prospects", "Leads"],
        &[(Lang::En, "Leads"), (Lang::Nl, "Prospects")],
    ),
    (
        &["Clients", "Customers"],
        &[(Lang::En, "Customers"), (Lang::Nl, "Klanten")],
    ),
    (
        &["Fournisseurs", "Suppliers"],
        &[(Lang::En, "Suppliers"), (Lang::Nl, "Leveranciers")],
    ),
    (&["Devis"], &[(Lang::En, "Proposals"), (Lang::Nl, "Offertes")]),
    (
        &["Commandes", "Orders"],
        &[(Lang::En, "Orders"), (Lang::Nl, "Bestellingen")],
    ),
    (
        &["Factures", "Invoices"],
        &[(Lang::En, "Invoices"), (Lang::Nl, "Facturen")],
    ),
    (
        &["Contrats", "Contracts"],
        &[(Lang::En, "Contracts"), (Lang::Nl, "Contracten")],
    ),
    (
        &["Interventions"],
        &[(Lang::En, "Interventions"), (Lang::Nl, "Interventies")],
    ),
    (
        &["Banques", "Banks"],
        &[(Lang::En, "Banks"), (Lang::Nl, "Banken")],
    ),
    (&["Agenda"], &[(Lang::En, "Calendar"), (Lang::Nl, "Agenda")]),
    (
        &["Adhérents", "Members"],
        &[(Lang::En, "Members"), (Lang::Nl, "Leden")],
    ),
    (
        &["Rechercher", "Search"],
        &[(Lang::En, "Search"), (Lang::Nl, "Zoeken")],
    ),
    (
        &["Nouveau", "New"],
        &[(Lang::En, "New"), (Lang::Nl, "Nieuw")],
    ),
];

/// 构建内置 CRM 规则表（源语言为法语）
pub fn rule_table() -> RuleTable {
    let mut rules = Vec::with_capacity(CRM_RULES.len());

    for (phrases, translations) in CRM_RULES {
        match TranslationRule::phrases(phrases, translations) {
            Ok(rule) => rules.push(rule),
            // 内置短语全部经过转义编译，失败在实践中不可达
            Err(err) => tracing::warn!("内置规则编译失败，已跳过: {}", err),
        }
    }

    RuleTable::new(Lang::Fr, rules)
}
