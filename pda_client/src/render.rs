use std::fmt::Write;

use anyhow::Result;

use crate::{program_client::AccountSnapshotView, session::AccountList};

///One line per snapshot: name, balance, address
pub fn render_accounts(title: &str, list: &AccountList) -> String {
    if list.is_empty() {
        return format!("No {title} fetched yet\n");
    }

    let mut out = format!("{title} ({})\n", list.len());
    for snap in list.snapshots() {
        // writing into a String cannot fail
        let _ = writeln!(out, "  {} | {} | {}", snap.name, snap.balance, snap.address);
    }

    out
}

pub fn render_accounts_json(list: &AccountList) -> Result<String> {
    let views: Vec<AccountSnapshotView> = list.snapshots().iter().map(Into::into).collect();

    Ok(serde_json::to_string_pretty(&views)?)
}

#[cfg(test)]
mod tests {
    use program_descriptor::{DecodedAccount, Value};
    use solana_sdk::pubkey::Pubkey;

    use super::*;
    use crate::program_client::AccountSnapshot;

    fn snapshot(name: &str, balance: u64) -> AccountSnapshot {
        AccountSnapshot::new(
            Pubkey::new_unique(),
            DecodedAccount {
                type_name: "Bank".to_string(),
                fields: vec![
                    ("name".to_string(), Value::from(name)),
                    ("balance".to_string(), Value::from(balance)),
                ],
            },
        )
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_accounts("banks", &AccountList::default()), "No banks fetched yet\n");
    }

    #[test]
    fn test_render_lines() {
        let mut list = AccountList::default();
        let snap = snapshot("WsoS Bank", 100_000_000);
        let address = snap.address;
        list.replace_all(vec![snap]);

        let rendered = render_accounts("banks", &list);

        assert_eq!(
            rendered,
            format!("banks (1)\n  WsoS Bank | 100000000 | {address}\n")
        );
    }

    #[test]
    fn test_render_json() {
        let mut list = AccountList::default();
        list.replace_all(vec![snapshot("JackPot", 3)]);

        let value: serde_json::Value =
            serde_json::from_str(&render_accounts_json(&list).unwrap()).unwrap();

        assert_eq!(value[0]["name"], "JackPot");
        assert_eq!(value[0]["balance"], 3);
    }
}
