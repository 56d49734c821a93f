use alloy::sol;

// Generate bindings for the Maverick V2 read surface. Only the methods the
// fetchers call are declared, overloads included.

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2Factory {
        function lookup(uint256 startIndex, uint256 endIndex) external view returns (address[] memory pools);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2Pool {
        struct State {
            uint128 reserveA;
            uint128 reserveB;
            int64 lastTwaD8;
            int64 lastLogPriceD8;
            uint40 lastTimestamp;
            int32 activeTick;
            bool isLocked;
            uint32 binCounter;
            uint8 protocolFeeRatioD3;
        }

        function tokenA() external view returns (address);
        function tokenB() external view returns (address);
        function tickSpacing() external view returns (uint256);
        function lookback() external view returns (uint256);
        function fee(bool tokenAIn) external view returns (uint256);
        function getState() external view returns (State memory);
        function getCurrentTwa() external view returns (int256);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2PoolLens {
        function getPoolSqrtPrice(address pool) external view returns (uint256 sqrtPrice);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2Position {
        struct PositionPoolBinIds {
            address pool;
            uint32[] binIds;
        }

        struct PositionFullInformation {
            PositionPoolBinIds poolBinIds;
            uint256 amountA;
            uint256 amountB;
            uint256[] binAAmounts;
            uint256[] binBAmounts;
            int32[] ticks;
            uint256[] liquidities;
        }

        function tokenIdsOfOwner(address owner) external view returns (uint256[] memory tokenIds);
        function tokenIdPositionInformation(uint256 tokenId, uint256 index) external view returns (PositionFullInformation memory output);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2BoostedPositionFactory {
        function lookup(uint256 startIndex, uint256 endIndex) external view returns (address[] memory boostedPositions);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2BoostedPositionLens {
        struct BoostedPositionInformation {
            address boostedPosition;
            address pool;
            uint8 kind;
            uint32[] binIds;
            uint128[] ratios;
            uint256 totalSupply;
            address tokenA;
            address tokenB;
            uint256 amountA;
            uint256 amountB;
        }

        struct UserBoostedPositionInformation {
            BoostedPositionInformation info;
            uint256 userBalance;
            uint256 userAmountA;
            uint256 userAmountB;
        }

        function boostedPositionUserInformation(address boostedPosition, address user) external view returns (UserBoostedPositionInformation memory);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2RewardFactory {
        function rewards(uint256 startIndex, uint256 endIndex) external view returns (address[] memory rewardList);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2Reward {
        function tokenIdsOfOwner(address owner) external view returns (uint256[] memory tokenIds);
        function stakingToken() external view returns (address);
        function stakeBalanceOf(uint256 tokenId) external view returns (uint256);
        function stakeTotalSupply() external view returns (uint256);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2VotingEscrow {
        function baseToken() external view returns (address);
    }
);

sol!(
    #[derive(Debug)]
    #[sol(rpc)]
    interface IMaverickV2VotingEscrowLens {
        struct Lockup {
            uint128 amount;
            uint128 end;
            uint256 votes;
        }

        function getLockups(address ve, address staker, uint256 startIndex, uint256 endIndex) external view returns (Lockup[] memory returnElements);
    }
);
