/*
 * Responsibility
 * - handler から呼ぶドメインサービスの公開ポイント
 */
pub mod password;
